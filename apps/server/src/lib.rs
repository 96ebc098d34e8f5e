//! Healthgen server
//!
//! HTTP front end for the generation engine:
//! - stores raw model specifications (PostgreSQL or in memory)
//! - generates Spring/JPA projects from stored or inline specifications
//! - returns a file manifest or a `.tar.gz` archive of the generated project

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
