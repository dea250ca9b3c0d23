//! Environment configuration resolution for stackforge
//!
//! This crate loads the JSON configuration document associated with a named
//! deployment environment and exposes key lookups against it. The document
//! is loaded once at construction and never mutated; lookups against
//! missing keys are logged and surfaced as `None` rather than errors.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{EnvResolver, DEFAULT_CONFIG_DIR};
pub use schema::*;
pub use validation::*;
