//! CloudFormation template document model

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use crate::error::{Result, SynthError};

/// Format version stamped on every synthesized template
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// A declared CloudFormation resource: a type name plus its properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// CloudFormation resource type, e.g. `AWS::SQS::Queue`
    #[serde(rename = "Type")]
    pub resource_type: String,
    /// Resource properties; empty property maps are omitted entirely
    #[serde(
        rename = "Properties",
        skip_serializing_if = "Map::is_empty",
        default
    )]
    pub properties: Map<String, Value>,
}

impl Resource {
    /// Create a resource of the given type with no properties
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            properties: Map::new(),
        }
    }

    /// Set a property; `Null` values are dropped so optional inputs that
    /// resolved to nothing never reach the template
    pub fn set_property(&mut self, name: &str, value: Value) {
        if !value.is_null() {
            self.properties.insert(name.to_string(), value);
        }
    }

    /// Builder-style variant of [`Resource::set_property`]
    pub fn with_property(mut self, name: &str, value: Value) -> Self {
        self.set_property(name, value);
        self
    }
}

/// An in-memory CloudFormation template.
///
/// Resources are kept in a sorted map so rendered templates are
/// byte-for-byte deterministic across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Template format version
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    /// Human readable description of what the template declares
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared resources keyed by logical ID
    #[serde(rename = "Resources")]
    pub resources: BTreeMap<String, Resource>,
}

impl Template {
    /// Empty template carrying the standard format version
    pub fn new(description: Option<String>) -> Self {
        Self {
            format_version: TEMPLATE_FORMAT_VERSION.to_string(),
            description,
            resources: BTreeMap::new(),
        }
    }

    /// Number of declared resources
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Render the template as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SynthError::Render(e.to_string()).into())
    }
}

/// `Ref` intrinsic pointing at another resource in the same template
pub fn ref_to(logical_id: &str) -> Value {
    json!({ "Ref": logical_id })
}

/// `Fn::GetAtt` intrinsic reading an attribute of another resource
pub fn get_att(logical_id: &str, attribute: &str) -> Value {
    json!({ "Fn::GetAtt": [logical_id, attribute] })
}
