//! CloudFormation construct layer
//!
//! This crate models stacks and the messaging resources declared inside
//! them, and renders each stack into a CloudFormation template. Assertion
//! helpers for inspecting synthesized templates live here too.

pub mod assertions;
pub mod sns;
pub mod sqs;
pub mod stack;

pub use assertions::*;
pub use sns::*;
pub use sqs::*;
pub use stack::*;
