use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusoto_core::Region;
use rusoto_sns::{MessageAttributeValue, PublishInput, Sns, SnsClient};
use tracing::info;

use crate::ec2_instance_client::StoppedInstance;
use crate::error::BudgetActionError;

/// SNS rejects subjects longer than this many characters.
pub const SUBJECT_LIMIT: usize = 100;
pub const NOTIFICATION_SEVERITY: &str = "HIGH";
pub const BUDGETS_DASHBOARD_URL: &str = "https://console.aws.amazon.com/billing/home#/budgets";

#[derive(Debug, Clone, PartialEq)]
pub struct StopReport {
    pub budget_name: String,
    pub threshold: f64,
    pub stopped_at: DateTime<Utc>,
    pub instances: Vec<StoppedInstance>,
}

impl StopReport {
    pub fn subject(&self) -> String {
        truncate_chars(
            &format!(
                "🚨 Budget Alert: {} Development Instances Stopped",
                self.instances.len()
            ),
            SUBJECT_LIMIT,
        )
    }

    pub fn message(&self) -> String {
        let mut lines = vec![
            "🚨 AWS Budget Action Triggered - Development Resources Stopped".to_string(),
            String::new(),
            format!("Budget: {}", self.budget_name),
            format!("Threshold: {}%", self.threshold),
            format!(
                "Action Time: {}",
                self.stopped_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            String::new(),
            format!("Stopped {} EC2 instances:", self.instances.len()),
            String::new(),
        ];

        for (index, instance) in self.instances.iter().enumerate() {
            lines.push(format!(
                "{}. Instance: {} ({})",
                index + 1,
                instance.instance_name,
                instance.instance_id
            ));
            lines.push(format!("   Region: {}", instance.region));
            lines.push(format!("   Type: {}", instance.instance_type));
            lines.push(format!("   Private IP: {}", instance.private_ip));
            lines.push(String::new());
        }

        lines.extend(
            [
                "Action Required:",
                "1. Review budget utilization in AWS Cost Explorer",
                "2. Identify cost drivers",
                "3. Implement cost optimization measures",
                "4. Restart instances only if budget allows",
                "",
                "To restart instances, remove AutoStopped tags and start manually.",
                "",
            ]
            .iter()
            .map(|line| line.to_string()),
        );
        lines.push(format!("Dashboard: {}", BUDGETS_DASHBOARD_URL));
        lines.push(String::new());
        lines.push("This is an automated message from AWS Lambda.".to_string());

        lines.join("\n")
    }

    fn message_attributes(&self) -> HashMap<String, MessageAttributeValue> {
        let mut attributes = HashMap::new();
        attributes.insert(
            "budget_name".to_string(),
            string_attribute("String", self.budget_name.clone()),
        );
        attributes.insert(
            "instances_stopped".to_string(),
            string_attribute("Number", self.instances.len().to_string()),
        );
        attributes.insert(
            "severity".to_string(),
            string_attribute("String", NOTIFICATION_SEVERITY.to_string()),
        );
        attributes
    }
}

fn string_attribute(data_type: &str, value: String) -> MessageAttributeValue {
    MessageAttributeValue {
        data_type: data_type.to_string(),
        string_value: Some(value),
        ..MessageAttributeValue::default()
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[async_trait]
pub trait Notify {
    /// Returns the published message id, or `None` when no topic is configured.
    async fn notify(&self, report: &StopReport) -> Result<Option<String>, BudgetActionError>;
}

pub struct SnsNotifier {
    client: SnsClient,
    topic_arn: Option<String>,
}

#[async_trait]
impl Notify for SnsNotifier {
    async fn notify(&self, report: &StopReport) -> Result<Option<String>, BudgetActionError> {
        let topic_arn = match self.topic_arn {
            Some(ref topic_arn) => topic_arn.clone(),
            None => {
                info!("SNS_TOPIC_ARN environment variable not set, skipping notification");
                return Ok(None);
            }
        };

        let response = self
            .client
            .publish(PublishInput {
                topic_arn: Some(topic_arn),
                subject: Some(report.subject()),
                message: report.message(),
                message_attributes: Some(report.message_attributes()),
                ..PublishInput::default()
            })
            .await?;

        Ok(response.message_id)
    }
}

impl SnsNotifier {
    pub fn new(region: Region, topic_arn: Option<String>) -> Self {
        SnsNotifier::new_with_client(SnsClient::new(region), topic_arn)
    }

    pub fn new_with_client(client: SnsClient, topic_arn: Option<String>) -> Self {
        SnsNotifier { client, topic_arn }
    }
}
