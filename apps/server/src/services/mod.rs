//! Service layer

pub mod codegen;

pub use codegen::{CodegenService, GenerationOutcome};
