//! Test assertions over synthesized templates

use serde_json::{json, Value};

use crate::stack::Stack;
use types::Template;

/// Assertion helper wrapping a synthesized template.
///
/// Every check panics on mismatch, so this type belongs in tests rather
/// than in library code.
pub struct TemplateAssertions {
    template: Value,
}

impl TemplateAssertions {
    /// Synthesize `stack` and wrap the result
    pub fn from_stack(stack: &Stack) -> Self {
        Self::from_template(&stack.to_template())
    }

    /// Wrap an already rendered template
    pub fn from_template(template: &Template) -> Self {
        let template = serde_json::to_value(template).expect("template always serializes");
        Self { template }
    }

    /// Assert the template declares exactly `count` resources of `resource_type`
    #[track_caller]
    pub fn resource_count_is(&self, resource_type: &str, count: usize) {
        let found = self.resources_of_type(resource_type).len();
        assert_eq!(
            found, count,
            "expected {count} resources of type {resource_type}, found {found}"
        );
    }

    /// Assert some resource of `resource_type` carries at least `properties`.
    ///
    /// Objects match as subsets; arrays and scalars must match exactly.
    #[track_caller]
    pub fn has_resource_properties(&self, resource_type: &str, properties: &Value) {
        let empty = json!({});
        let matched = self
            .resources_of_type(resource_type)
            .iter()
            .any(|resource| {
                let actual = resource.get("Properties").unwrap_or(&empty);
                matches_subset(actual, properties)
            });
        assert!(
            matched,
            "no {resource_type} resource matches {properties}, template: {}",
            self.template
        );
    }

    /// All resources of the given type, in template order
    pub fn resources_of_type(&self, resource_type: &str) -> Vec<&Value> {
        self.template
            .get("Resources")
            .and_then(Value::as_object)
            .map(|resources| {
                resources
                    .values()
                    .filter(|resource| {
                        resource.get("Type").and_then(Value::as_str) == Some(resource_type)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// True when `actual` carries everything `expected` asks for
fn matches_subset(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => expected
            .iter()
            .all(|(key, value)| actual.get(key).is_some_and(|a| matches_subset(a, value))),
        (Value::Array(actual), Value::Array(expected)) => {
            actual.len() == expected.len()
                && actual.iter().zip(expected).all(|(a, e)| matches_subset(a, e))
        }
        _ => actual == expected,
    }
}
