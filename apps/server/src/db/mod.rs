//! Database layer - spec storage backends

pub mod memory;
pub mod specs;
pub mod traits;

pub use memory::InMemorySpecStore;
pub use specs::PostgresSpecStore;
pub use traits::{NewSpec, SpecRecord, SpecStore, STATUS_SAVED};
