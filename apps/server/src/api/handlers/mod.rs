//! Request handlers for API endpoints
//!
//! Handlers extract and check request input, call the service layer and
//! shape the response. Errors are rendered by [`crate::Error`].

pub mod codegen;
pub mod specs;

pub use codegen::*;
pub use specs::*;
