use serde::Deserialize;
use serde_json::Value;

use crate::error::BudgetActionError;

const DEFAULT_ACTION_BUDGET: &str = "Development-Account-Monthly-Budget";
const DEFAULT_ACTION_THRESHOLD: f64 = 100.0;
const UNKNOWN_BUDGET: &str = "Unknown Budget";

/// Budget action event that triggers the stop handler.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BudgetEvent {
    #[serde(default)]
    pub detail: BudgetDetail,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDetail {
    #[serde(default = "default_action_budget")]
    pub budget_name: String,
    #[serde(default = "default_action_threshold")]
    pub threshold: f64,
}

impl Default for BudgetDetail {
    fn default() -> Self {
        Self {
            budget_name: default_action_budget(),
            threshold: DEFAULT_ACTION_THRESHOLD,
        }
    }
}

fn default_action_budget() -> String {
    DEFAULT_ACTION_BUDGET.to_string()
}

fn default_action_threshold() -> f64 {
    DEFAULT_ACTION_THRESHOLD
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    #[serde(default = "unknown_budget")]
    pub budget_name: String,
    pub threshold: f64,
    #[serde(default)]
    pub current_spend: f64,
    #[serde(default)]
    pub budget_limit: f64,
    #[serde(default)]
    pub percentage: f64,
}

fn unknown_budget() -> String {
    UNKNOWN_BUDGET.to_string()
}

#[derive(Debug, Deserialize)]
struct SnsEvent {
    #[serde(rename = "Records")]
    records: Vec<SnsRecord>,
}

#[derive(Debug, Deserialize)]
struct SnsRecord {
    #[serde(rename = "Sns")]
    sns: SnsMessage,
}

#[derive(Debug, Deserialize)]
struct SnsMessage {
    #[serde(rename = "Message")]
    message: Value,
}

impl BudgetAlert {
    /// Reads the first SNS record. The message body is either a JSON encoded
    /// string or an object carrying the alert fields directly.
    pub fn from_sns_event(event: Value) -> Result<Self, BudgetActionError> {
        let event: SnsEvent = serde_json::from_value(event)?;
        let record = event
            .records
            .into_iter()
            .next()
            .ok_or(BudgetActionError::MissingRecord)?;
        match record.sns.message {
            Value::String(body) => Ok(serde_json::from_str(&body)?),
            message => Ok(serde_json::from_value(message)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::alert::{BudgetAlert, BudgetDetail, BudgetEvent};
    use crate::error::BudgetActionError;
    use serde_json::json;

    #[test]
    fn test_budget_event_defaults() {
        let event: BudgetEvent = serde_json::from_value(json!({})).unwrap();
        assert_eq!(
            event.detail,
            BudgetDetail {
                budget_name: "Development-Account-Monthly-Budget".to_string(),
                threshold: 100.0,
            }
        );
    }

    #[test]
    fn test_budget_event_detail() {
        let event: BudgetEvent = serde_json::from_value(json!({
            "detail": {
                "budgetName": "Sandbox-Monthly-Budget",
                "threshold": 120,
                "currentSpend": 5100,
                "budgetAmount": 5000
            }
        }))
        .unwrap();
        assert_eq!(event.detail.budget_name, "Sandbox-Monthly-Budget");
        assert_eq!(event.detail.threshold, 120.0);
    }

    #[test]
    fn test_from_string_message() {
        let message = json!({
            "budgetName": "Excipient-Master-Monthly-Budget",
            "threshold": 85,
            "currentSpend": 42500,
            "budgetLimit": 50000,
            "percentage": 85
        })
        .to_string();
        let alert = BudgetAlert::from_sns_event(json!({
            "Records": [{ "Sns": { "Message": message } }]
        }))
        .unwrap();
        assert_eq!(
            alert,
            BudgetAlert {
                budget_name: "Excipient-Master-Monthly-Budget".to_string(),
                threshold: 85.0,
                current_spend: 42500.0,
                budget_limit: 50000.0,
                percentage: 85.0,
            }
        );
    }

    #[test]
    fn test_from_object_message_with_defaults() {
        let alert = BudgetAlert::from_sns_event(json!({
            "Records": [{ "Sns": { "Message": { "threshold": 92.5 } } }]
        }))
        .unwrap();
        assert_eq!(alert.budget_name, "Unknown Budget");
        assert_eq!(alert.threshold, 92.5);
        assert_eq!(alert.current_spend, 0.0);
        assert_eq!(alert.budget_limit, 0.0);
    }

    #[test]
    fn test_malformed_message() {
        let result = BudgetAlert::from_sns_event(json!({
            "Records": [{ "Sns": { "Message": "{not json" } }]
        }));
        assert!(matches!(result, Err(BudgetActionError::Json(_))));
    }

    #[test]
    fn test_missing_threshold() {
        let result = BudgetAlert::from_sns_event(json!({
            "Records": [{ "Sns": { "Message": { "budgetName": "b" } } }]
        }));
        assert!(matches!(result, Err(BudgetActionError::Json(_))));
    }

    #[test]
    fn test_no_records() {
        let result = BudgetAlert::from_sns_event(json!({ "Records": [] }));
        assert!(matches!(result, Err(BudgetActionError::MissingRecord)));

        let result = BudgetAlert::from_sns_event(json!({}));
        assert!(matches!(result, Err(BudgetActionError::Json(_))));
    }
}
