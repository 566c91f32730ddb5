use chrono::{DateTime, Utc};
use rusoto_core::Region;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::alert::BudgetEvent;
use crate::config::StopConfig;
use crate::ec2_instance_client::{StopDevelopment, StoppedInstance};
use crate::error::BudgetActionError;
use crate::notification::{Notify, StopReport};
use crate::output::HandlerOutput;

pub const NO_INSTANCES_MESSAGE: &str = "No development instances to stop";

#[derive(Debug, Serialize)]
struct StopSummary<'a> {
    message: String,
    instances: &'a [StoppedInstance],
}

/// Stops development instances region by region and reports what was stopped.
///
/// `clients` builds the regional client for each configured region, so tests can
/// hand out fakes instead of EC2 clients.
pub struct StopHandler<F, N> {
    config: StopConfig,
    clients: F,
    notifier: N,
}

impl<F, C, N> StopHandler<F, N>
where
    F: Fn(&Region) -> C + Send + Sync,
    C: StopDevelopment + Send + Sync,
    N: Notify + Send + Sync,
{
    pub fn new(config: StopConfig, clients: F, notifier: N) -> Self {
        StopHandler {
            config,
            clients,
            notifier,
        }
    }

    pub async fn handle(&self, event: BudgetEvent) -> Result<HandlerOutput, BudgetActionError> {
        self.handle_at(event, Utc::now()).await
    }

    pub async fn handle_at(
        &self,
        event: BudgetEvent,
        now: DateTime<Utc>,
    ) -> Result<HandlerOutput, BudgetActionError> {
        let detail = event.detail;
        info!(
            budget = %detail.budget_name,
            threshold = detail.threshold,
            "budget action triggered"
        );

        let instances = self.stop_all_regions(now).await;
        if instances.is_empty() {
            info!("no development instances found to stop");
            return HandlerOutput::ok(&json!({ "message": NO_INSTANCES_MESSAGE }));
        }

        let report = StopReport {
            budget_name: detail.budget_name,
            threshold: detail.threshold,
            stopped_at: now,
            instances,
        };
        // Instances are already stopped; a failed notification must not fail the invocation.
        match self.notifier.notify(&report).await {
            Ok(Some(message_id)) => info!(message_id = %message_id, "notification sent"),
            Ok(None) => {}
            Err(error) => error!(error = %error, "error sending notification"),
        }

        HandlerOutput::ok(&StopSummary {
            message: format!(
                "Stopped {} development instances",
                report.instances.len()
            ),
            instances: &report.instances,
        })
    }

    async fn stop_all_regions(&self, now: DateTime<Utc>) -> Vec<StoppedInstance> {
        let mut stopped = Vec::new();
        for region in &self.config.regions {
            info!(region = region.name(), "checking region");
            let client = (self.clients)(region);
            match client
                .stop_development_instances(&self.config.tag_values, now)
                .await
            {
                Ok(instances) if instances.is_empty() => {
                    info!(region = region.name(), "no running development instances found")
                }
                Ok(instances) => {
                    info!(
                        region = region.name(),
                        count = instances.len(),
                        "stopped instances"
                    );
                    stopped.extend(instances);
                }
                Err(error) => error!(
                    region = region.name(),
                    error = %error,
                    "error stopping instances"
                ),
            }
        }
        stopped
    }
}
