use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info};

use crate::error::BudgetActionError;

#[async_trait]
pub trait Deliver {
    async fn deliver(&self, url: &str, message: &Value) -> Result<(), BudgetActionError>;
}

#[derive(Debug, Clone, Default)]
pub struct WebhookClient {
    client: reqwest::Client,
}

#[async_trait]
impl Deliver for WebhookClient {
    async fn deliver(&self, url: &str, message: &Value) -> Result<(), BudgetActionError> {
        let response = self.client.post(url).json(message).send().await?;

        let status = response.status();
        if status.is_success() {
            info!("Slack notification sent successfully");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!(status = status.as_u16(), response = %body, "failed to send Slack notification");
        Err(BudgetActionError::WebhookStatus {
            status: status.as_u16(),
            body,
        })
    }
}

impl WebhookClient {
    pub fn new_with_client(client: reqwest::Client) -> Self {
        WebhookClient { client }
    }
}
