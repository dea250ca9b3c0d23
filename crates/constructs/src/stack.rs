//! Stack construct owning declared resources

use std::collections::BTreeMap;

use types::{DeploymentTarget, Resource, Result, SynthError, Template};

/// Properties accepted when declaring a stack
#[derive(Debug, Clone, Default)]
pub struct StackProps {
    /// Physical stack name; defaults to the construct id
    pub stack_name: Option<String>,
    /// Description embedded in the rendered template
    pub description: Option<String>,
    /// Account and region the stack deploys into
    pub target: DeploymentTarget,
}

/// A deployable collection of resources rendered to a single template
#[derive(Debug, Clone)]
pub struct Stack {
    id: String,
    stack_name: String,
    description: Option<String>,
    target: DeploymentTarget,
    resources: BTreeMap<String, Resource>,
}

impl Stack {
    /// Declare a stack
    pub fn new(id: &str, props: StackProps) -> Result<Self> {
        let stack_name = props.stack_name.unwrap_or_else(|| id.to_string());
        if stack_name.trim().is_empty() {
            return Err(SynthError::EmptyStackName.into());
        }

        Ok(Self {
            id: id.to_string(),
            stack_name,
            description: props.description,
            target: props.target,
            resources: BTreeMap::new(),
        })
    }

    /// Add a resource under `logical_id`, returning the id actually used.
    ///
    /// The id is reduced to the alphanumeric characters CloudFormation
    /// accepts. Ids that collapse to nothing, or that collide with an
    /// already declared resource, are rejected.
    pub fn add_resource(&mut self, logical_id: &str, resource: Resource) -> Result<String> {
        let sanitized = sanitize_logical_id(logical_id);
        if sanitized.is_empty() {
            return Err(SynthError::InvalidLogicalId {
                id: logical_id.to_string(),
            }
            .into());
        }
        if self.resources.contains_key(&sanitized) {
            return Err(SynthError::DuplicateLogicalId { id: sanitized }.into());
        }

        self.resources.insert(sanitized.clone(), resource);
        Ok(sanitized)
    }

    /// True when a resource is already declared under `logical_id`.
    ///
    /// The id is sanitized the same way `add_resource` sanitizes it, so
    /// the answer matches what adding under that id would collide with.
    pub fn contains_resource(&self, logical_id: &str) -> bool {
        self.resources.contains_key(&sanitize_logical_id(logical_id))
    }

    /// Construct id the stack was declared with
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Physical stack name
    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    /// Account and region the stack deploys into
    pub fn target(&self) -> &DeploymentTarget {
        &self.target
    }

    /// Number of resources declared so far
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Render the stack to a CloudFormation template
    pub fn to_template(&self) -> Template {
        let mut template = Template::new(self.description.clone());
        template.resources = self.resources.clone();
        template
    }
}

/// Strip everything CloudFormation does not accept in a logical id
fn sanitize_logical_id(id: &str) -> String {
    id.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}
