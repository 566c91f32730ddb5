use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusoto_core::Region;
use rusoto_ec2::{
    CreateTagsRequest, DescribeInstancesRequest, Ec2, Ec2Client, Filter, Instance,
    StopInstancesRequest, Tag,
};
use serde::Serialize;
use tracing::info;

use crate::config::ENVIRONMENT_TAG;
use crate::error::BudgetActionError;

const NAME_TAG: &str = "Name";
const UNNAMED: &str = "Unnamed";
const NO_PRIVATE_IP: &str = "N/A";
const RUNNING: &str = "running";

pub const STOPPED_BY_TAG: &str = "AutoStoppedBy";
pub const STOPPED_AT_TAG: &str = "AutoStoppedAt";
pub const STOPPED_REASON_TAG: &str = "AutoStoppedReason";
pub const STOPPED_BY: &str = "BudgetAction";
pub const STOPPED_REASON: &str = "Development budget threshold exceeded";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoppedInstance {
    pub instance_id: String,
    pub instance_name: String,
    pub region: String,
    pub instance_type: String,
    pub private_ip: String,
    pub launch_time: String,
}

#[async_trait]
pub trait StopDevelopment {
    /// Stops every running instance whose environment tag is one of `tag_values`
    /// and labels them with the audit tags.
    async fn stop_development_instances(
        &self,
        tag_values: &[String],
        stopped_at: DateTime<Utc>,
    ) -> Result<Vec<StoppedInstance>, BudgetActionError>;
}

pub struct Ec2InstanceClient {
    client: Ec2Client,
    region: Region,
}

#[async_trait]
impl StopDevelopment for Ec2InstanceClient {
    async fn stop_development_instances(
        &self,
        tag_values: &[String],
        stopped_at: DateTime<Utc>,
    ) -> Result<Vec<StoppedInstance>, BudgetActionError> {
        let instances = self.describe_development_instances(tag_values).await?;
        if instances.is_empty() {
            return Ok(instances);
        }

        let instance_ids: Vec<String> = instances
            .iter()
            .map(|instance| instance.instance_id.clone())
            .collect();
        info!(
            region = self.region.name(),
            count = instance_ids.len(),
            ids = ?instance_ids,
            "stopping instances"
        );

        self.client
            .stop_instances(StopInstancesRequest {
                instance_ids: instance_ids.clone(),
                ..StopInstancesRequest::default()
            })
            .await?;

        self.client
            .create_tags(CreateTagsRequest {
                resources: instance_ids,
                tags: audit_tags(stopped_at),
                ..CreateTagsRequest::default()
            })
            .await?;

        Ok(instances)
    }
}

impl Ec2InstanceClient {
    pub fn new(region: Region) -> Self {
        Ec2InstanceClient::new_with_client(Ec2Client::new(region.clone()), region)
    }

    pub fn new_with_client(client: Ec2Client, region: Region) -> Self {
        Ec2InstanceClient { client, region }
    }

    async fn describe_development_instances(
        &self,
        tag_values: &[String],
    ) -> Result<Vec<StoppedInstance>, BudgetActionError> {
        let mut instances = Vec::<StoppedInstance>::new();
        let mut next_token = None;
        loop {
            let request = DescribeInstancesRequest {
                filters: Some(development_filters(tag_values)),
                next_token: next_token.take(),
                ..DescribeInstancesRequest::default()
            };
            let result = self.client.describe_instances(request).await?;

            for reservation in result.reservations.unwrap_or_default() {
                for instance in reservation.instances.unwrap_or_default() {
                    instances.push(self.stopped_instance(instance)?);
                }
            }

            match result.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }
        Ok(instances)
    }

    fn stopped_instance(&self, instance: Instance) -> Result<StoppedInstance, BudgetActionError> {
        let instance_name = instance
            .tags
            .unwrap_or_default()
            .into_iter()
            .find(|tag| tag.key.as_deref() == Some(NAME_TAG))
            .and_then(|tag| tag.value)
            .unwrap_or_else(|| UNNAMED.to_string());

        Ok(StoppedInstance {
            instance_id: instance.instance_id.ok_or(BudgetActionError::NoneValue)?,
            instance_name,
            region: self.region.name().to_string(),
            instance_type: instance.instance_type.unwrap_or_default(),
            private_ip: instance
                .private_ip_address
                .unwrap_or_else(|| NO_PRIVATE_IP.to_string()),
            launch_time: instance.launch_time.unwrap_or_default(),
        })
    }
}

fn development_filters(tag_values: &[String]) -> Vec<Filter> {
    vec![
        Filter {
            name: Some(format!("tag:{}", ENVIRONMENT_TAG)),
            values: Some(tag_values.to_vec()),
        },
        Filter {
            name: Some("instance-state-name".to_string()),
            values: Some(vec![RUNNING.to_string()]),
        },
    ]
}

pub fn audit_tags(stopped_at: DateTime<Utc>) -> Vec<Tag> {
    vec![
        Tag {
            key: Some(STOPPED_BY_TAG.to_string()),
            value: Some(STOPPED_BY.to_string()),
        },
        Tag {
            key: Some(STOPPED_AT_TAG.to_string()),
            value: Some(stopped_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        },
        Tag {
            key: Some(STOPPED_REASON_TAG.to_string()),
            value: Some(STOPPED_REASON.to_string()),
        },
    ]
}
