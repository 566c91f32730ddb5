use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{error, info};

use crate::alert::BudgetAlert;
use crate::config::RelayConfig;
use crate::error::BudgetActionError;
use crate::output::HandlerOutput;
use crate::slack;
use crate::webhook::Deliver;

pub const SENT_MESSAGE: &str = "Slack notification sent successfully";

pub struct RelayHandler<D> {
    config: RelayConfig,
    delivery: D,
}

impl<D> RelayHandler<D>
where
    D: Deliver + Send + Sync,
{
    pub fn new(config: RelayConfig, delivery: D) -> Self {
        RelayHandler { config, delivery }
    }

    pub async fn handle(&self, event: Value) -> Result<HandlerOutput, BudgetActionError> {
        self.handle_at(event, Utc::now()).await
    }

    /// Malformed events are answered with a 500 output; configuration and
    /// delivery failures are returned as errors.
    pub async fn handle_at(
        &self,
        event: Value,
        now: DateTime<Utc>,
    ) -> Result<HandlerOutput, BudgetActionError> {
        info!(event = %event, "budget alert received");

        match self.relay(event, now).await {
            Ok(()) => HandlerOutput::ok(SENT_MESSAGE),
            Err(error) if error.is_parse_error() => {
                error!(error = %error, "error processing event");
                HandlerOutput::error(&error)
            }
            Err(error) => {
                error!(error = %error, "error sending Slack notification");
                Err(error)
            }
        }
    }

    async fn relay(&self, event: Value, now: DateTime<Utc>) -> Result<(), BudgetActionError> {
        let alert = BudgetAlert::from_sns_event(event)?;
        let webhook_url = self.config.webhook_url.as_deref().ok_or_else(|| {
            BudgetActionError::Configuration("Slack webhook URL not configured".to_string())
        })?;

        let message = slack::build_message(
            &alert,
            &self.config.severity,
            &self.config.colors,
            now,
        );
        self.delivery.deliver(webhook_url, &message).await
    }
}

#[cfg(test)]
mod tests {
    use crate::config::RelayConfig;
    use crate::error::BudgetActionError;
    use crate::relay_handler::RelayHandler;
    use crate::webhook::Deliver;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use serde_json::{json, Value};
    use std::str::FromStr;
    use std::sync::Mutex;

    const WEBHOOK: &str = "https://hooks.slack.com/services/T000/B000/XXXX";

    #[derive(Default)]
    struct FakeWebhook {
        status: Option<u16>,
        posts: Mutex<Vec<(String, Value)>>,
    }

    #[async_trait]
    impl Deliver for FakeWebhook {
        async fn deliver(&self, url: &str, message: &Value) -> Result<(), BudgetActionError> {
            self.posts
                .lock()
                .unwrap()
                .push((url.to_string(), message.clone()));
            match self.status {
                Some(status) => Err(BudgetActionError::WebhookStatus {
                    status,
                    body: "invalid_payload".to_string(),
                }),
                None => Ok(()),
            }
        }
    }

    fn config(webhook_url: Option<&str>) -> RelayConfig {
        RelayConfig {
            webhook_url: webhook_url.map(str::to_string),
            ..RelayConfig::default()
        }
    }

    fn event(message: Value) -> Value {
        json!({ "Records": [{ "Sns": { "Message": message } }] })
    }

    fn now() -> DateTime<Utc> {
        DateTime::<Utc>::from_str("2020-12-01T15:04:05.0+00:00").unwrap()
    }

    #[tokio::test]
    async fn test_relay() {
        let handler = RelayHandler::new(config(Some(WEBHOOK)), FakeWebhook::default());
        let message = json!({
            "budgetName": "Excipient-Master-Monthly-Budget",
            "threshold": 100,
            "currentSpend": 5100,
            "budgetLimit": 5000,
            "percentage": 102
        });

        let output = handler
            .handle_at(event(Value::String(message.to_string())), now())
            .await
            .unwrap();

        assert_eq!(output.status_code, 200);
        assert_eq!(output.body, r#""Slack notification sent successfully""#);

        let posts = handler.delivery.posts.lock().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, WEBHOOK);
        let slack = &posts[0].1;
        assert_eq!(slack["blocks"][1]["fields"][1]["text"], "*Severity:*\n🔴 CRITICAL");
        assert_eq!(slack["blocks"][2]["fields"][1]["text"], "*Current Usage:*\n102%");
        assert_eq!(slack["attachments"][0]["color"], "#dc3545");
        assert_eq!(
            slack["blocks"][7]["text"]["text"]
                .as_str()
                .unwrap()
                .lines()
                .count(),
            5
        );
    }

    #[tokio::test]
    async fn test_relay_object_message() {
        let handler = RelayHandler::new(config(Some(WEBHOOK)), FakeWebhook::default());

        let output = handler
            .handle_at(event(json!({ "budgetName": "Team", "threshold": 87 })), now())
            .await
            .unwrap();

        assert_eq!(output.status_code, 200);
        let posts = handler.delivery.posts.lock().unwrap();
        assert_eq!(posts[0].1["blocks"][1]["fields"][1]["text"], "*Severity:*\n🟡 MEDIUM");
        assert_eq!(posts[0].1["attachments"][0]["color"], "#ffc107");
    }

    #[tokio::test]
    async fn test_missing_webhook_url() {
        let handler = RelayHandler::new(config(None), FakeWebhook::default());

        let result = handler
            .handle_at(event(json!({ "threshold": 90 })), now())
            .await;

        assert!(matches!(result, Err(BudgetActionError::Configuration(_))));
        assert!(handler.delivery.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_message() {
        let handler = RelayHandler::new(config(Some(WEBHOOK)), FakeWebhook::default());

        let output = handler
            .handle_at(event(Value::String("{\"threshold\": ".to_string())), now())
            .await
            .unwrap();

        assert_eq!(output.status_code, 500);
        let body: String = serde_json::from_str(&output.body).unwrap();
        assert!(body.starts_with("Error: Invalid JSON: "));
        assert!(handler.delivery.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_records() {
        let handler = RelayHandler::new(config(Some(WEBHOOK)), FakeWebhook::default());

        let output = handler.handle_at(json!({ "Records": [] }), now()).await.unwrap();

        assert_eq!(output.status_code, 500);
        assert_eq!(output.body, r#""Error: Event contains no SNS record""#);
    }

    #[tokio::test]
    async fn test_delivery_failure_is_propagated() {
        let webhook = FakeWebhook {
            status: Some(400),
            ..FakeWebhook::default()
        };
        let handler = RelayHandler::new(config(Some(WEBHOOK)), webhook);

        let result = handler
            .handle_at(event(json!({ "threshold": 50 })), now())
            .await;

        assert!(matches!(
            result,
            Err(BudgetActionError::WebhookStatus { status: 400, .. })
        ));
    }
}
