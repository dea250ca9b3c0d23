//! Deployment environment types

use serde::{Deserialize, Serialize};

/// Well-known configuration document keys read by the declaration layer
pub mod keys {
    /// AWS account the environment deploys into
    pub const ACCOUNT_ID: &str = "AccountId";
    /// AWS region the environment deploys into
    pub const AWS_REGION: &str = "AWSRegion";
    /// Deployment stage used to name physical resources
    pub const STAGE: &str = "Stage";
}

/// Account and region a stack deploys into.
///
/// Both sides are optional: a document may omit them and synthesis still
/// succeeds, leaving the stack environment-agnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentTarget {
    /// Twelve digit AWS account identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// AWS region name, e.g. `us-east-1`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl DeploymentTarget {
    /// Create a target from resolved account and region values
    pub fn new(account: Option<String>, region: Option<String>) -> Self {
        Self { account, region }
    }

    /// True when neither account nor region is pinned
    pub fn is_unresolved(&self) -> bool {
        self.account.is_none() && self.region.is_none()
    }
}
