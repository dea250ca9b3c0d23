//! SNS topic construct and queue subscriptions

use serde_json::{json, Value};
use types::{ref_to, Resource, Result, SynthError};

use crate::sqs::{self, Queue};
use crate::stack::Stack;

/// CloudFormation type for a topic
pub const TOPIC_RESOURCE_TYPE: &str = "AWS::SNS::Topic";
/// CloudFormation type for a subscription
pub const SUBSCRIPTION_RESOURCE_TYPE: &str = "AWS::SNS::Subscription";

/// Properties accepted when declaring a topic
#[derive(Debug, Clone, Default)]
pub struct TopicProps {
    /// Physical topic name; unnamed topics get one generated at deploy time
    pub topic_name: Option<String>,
}

/// An SNS topic declared within a stack
#[derive(Debug, Clone)]
pub struct Topic {
    logical_id: String,
}

impl Topic {
    /// Declare a topic in `stack`
    pub fn new(stack: &mut Stack, logical_id: &str, props: TopicProps) -> Result<Self> {
        let mut resource = Resource::new(TOPIC_RESOURCE_TYPE);
        if let Some(name) = props.topic_name {
            resource.set_property("TopicName", json!(name));
        }

        let logical_id = stack.add_resource(logical_id, resource)?;
        Ok(Self { logical_id })
    }

    /// Logical id of the topic within its stack
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// Deploy-time reference to the topic ARN.
    ///
    /// `Ref` on a topic resolves to its ARN.
    pub fn arn(&self) -> Value {
        ref_to(&self.logical_id)
    }

    /// Subscribe `queue` to this topic.
    ///
    /// Declares the subscription itself plus a queue policy letting the
    /// topic deliver into the queue. Both logical ids are checked before
    /// either resource is declared, so a rejected call leaves the stack
    /// unchanged. Returns the subscription's logical id.
    pub fn add_sqs_subscription(&self, stack: &mut Stack, queue: &Queue) -> Result<String> {
        let subscription_id = format!("{}{}Subscription", queue.logical_id(), self.logical_id);
        let policy_id = format!("{}Policy", queue.logical_id());
        for id in [subscription_id.as_str(), policy_id.as_str()] {
            if stack.contains_resource(id) {
                return Err(SynthError::DuplicateLogicalId { id: id.to_string() }.into());
            }
        }

        let subscription = Resource::new(SUBSCRIPTION_RESOURCE_TYPE)
            .with_property("Protocol", json!("sqs"))
            .with_property("TopicArn", self.arn())
            .with_property("Endpoint", queue.arn());
        let subscription_id = stack.add_resource(&subscription_id, subscription)?;

        let policy = sqs::sns_delivery_policy(queue, &self.arn());
        stack.add_resource(&policy_id, policy)?;

        Ok(subscription_id)
    }
}
