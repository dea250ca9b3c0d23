//! Shared types for the stackforge synthesizer
//!
//! This crate contains the domain types used across the stackforge
//! workspace: the error taxonomy, deployment environment types, and the
//! CloudFormation template document model.

pub mod environment;
pub mod error;
pub mod template;

// Re-export commonly used types
pub use environment::{keys, DeploymentTarget};
pub use error::{ConfigError, Result, StackforgeError, SynthError};
pub use template::{get_att, ref_to, Resource, Template, TEMPLATE_FORMAT_VERSION};
