//! SQS queue construct

use serde_json::{json, Value};
use types::{get_att, ref_to, Resource, Result};

use crate::stack::Stack;

/// CloudFormation type for a queue
pub const QUEUE_RESOURCE_TYPE: &str = "AWS::SQS::Queue";
/// CloudFormation type for a queue policy
pub const QUEUE_POLICY_RESOURCE_TYPE: &str = "AWS::SQS::QueuePolicy";

/// Properties accepted when declaring a queue
#[derive(Debug, Clone, Default)]
pub struct QueueProps {
    /// Physical queue name; unnamed queues get one generated at deploy time
    pub queue_name: Option<String>,
    /// Seconds a received message stays hidden from other consumers
    pub visibility_timeout_seconds: Option<u64>,
}

/// An SQS queue declared within a stack
#[derive(Debug, Clone)]
pub struct Queue {
    logical_id: String,
}

impl Queue {
    /// Declare a queue in `stack`
    pub fn new(stack: &mut Stack, logical_id: &str, props: QueueProps) -> Result<Self> {
        let mut resource = Resource::new(QUEUE_RESOURCE_TYPE);
        if let Some(name) = props.queue_name {
            resource.set_property("QueueName", json!(name));
        }
        if let Some(seconds) = props.visibility_timeout_seconds {
            resource.set_property("VisibilityTimeout", json!(seconds));
        }

        let logical_id = stack.add_resource(logical_id, resource)?;
        Ok(Self { logical_id })
    }

    /// Logical id of the queue within its stack
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// Deploy-time reference to the queue ARN
    pub fn arn(&self) -> Value {
        get_att(&self.logical_id, "Arn")
    }

    /// Deploy-time reference to the queue URL.
    ///
    /// `Ref` on a queue resolves to its URL.
    pub fn url(&self) -> Value {
        ref_to(&self.logical_id)
    }
}

/// Policy resource allowing the topic behind `topic_arn` to deliver into `queue`
pub(crate) fn sns_delivery_policy(queue: &Queue, topic_arn: &Value) -> Resource {
    Resource::new(QUEUE_POLICY_RESOURCE_TYPE)
        .with_property(
            "PolicyDocument",
            json!({
                "Version": "2012-10-17",
                "Statement": [{
                    "Effect": "Allow",
                    "Principal": { "Service": "sns.amazonaws.com" },
                    "Action": "sqs:SendMessage",
                    "Resource": queue.arn(),
                    "Condition": {
                        "ArnEquals": { "aws:SourceArn": topic_arn }
                    }
                }]
            }),
        )
        .with_property("Queues", json!([queue.url()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::StackProps;

    fn stack() -> Stack {
        Stack::new("MessagingStack", StackProps::default()).unwrap()
    }

    #[test]
    fn test_queue_carries_configured_properties() {
        let mut stack = stack();
        Queue::new(
            &mut stack,
            "MessagingQueue",
            QueueProps {
                queue_name: Some("dev".to_string()),
                visibility_timeout_seconds: Some(300),
            },
        )
        .unwrap();

        let template = serde_json::to_value(stack.to_template()).unwrap();
        let properties = &template["Resources"]["MessagingQueue"]["Properties"];
        assert_eq!(properties["QueueName"], json!("dev"));
        assert_eq!(properties["VisibilityTimeout"], json!(300));
    }

    #[test]
    fn test_unnamed_queue_omits_the_name_property() {
        let mut stack = stack();
        Queue::new(&mut stack, "MessagingQueue", QueueProps::default()).unwrap();

        let template = serde_json::to_value(stack.to_template()).unwrap();
        let queue = &template["Resources"]["MessagingQueue"];
        assert_eq!(queue["Type"], json!(QUEUE_RESOURCE_TYPE));
        assert!(queue.get("Properties").is_none());
    }

    #[test]
    fn test_queue_references() {
        let mut stack = stack();
        let queue = Queue::new(&mut stack, "MessagingQueue", QueueProps::default()).unwrap();

        assert_eq!(queue.arn(), json!({ "Fn::GetAtt": ["MessagingQueue", "Arn"] }));
        assert_eq!(queue.url(), json!({ "Ref": "MessagingQueue" }));
    }

    #[test]
    fn test_delivery_policy_scopes_to_the_topic() {
        let mut stack = stack();
        let queue = Queue::new(&mut stack, "MessagingQueue", QueueProps::default()).unwrap();

        let topic_arn = json!({ "Ref": "MessagingTopic" });
        let policy = sns_delivery_policy(&queue, &topic_arn);
        let policy = serde_json::to_value(policy).unwrap();

        assert_eq!(policy["Type"], json!(QUEUE_POLICY_RESOURCE_TYPE));
        assert_eq!(policy["Properties"]["Queues"], json!([{ "Ref": "MessagingQueue" }]));

        let statement = &policy["Properties"]["PolicyDocument"]["Statement"][0];
        assert_eq!(statement["Effect"], json!("Allow"));
        assert_eq!(statement["Principal"]["Service"], json!("sns.amazonaws.com"));
        assert_eq!(statement["Action"], json!("sqs:SendMessage"));
        assert_eq!(statement["Condition"]["ArnEquals"]["aws:SourceArn"], topic_arn);
    }
}
