use serde::Serialize;

use crate::error::BudgetActionError;

/// Response returned by both handlers; `body` holds JSON text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerOutput {
    pub status_code: u16,
    pub body: String,
}

impl HandlerOutput {
    pub fn ok<T: Serialize + ?Sized>(body: &T) -> Result<Self, BudgetActionError> {
        Ok(HandlerOutput {
            status_code: 200,
            body: serde_json::to_string(body)?,
        })
    }

    pub fn error(error: &BudgetActionError) -> Result<Self, BudgetActionError> {
        Ok(HandlerOutput {
            status_code: 500,
            body: serde_json::to_string(&format!("Error: {}", error))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::BudgetActionError;
    use crate::output::HandlerOutput;
    use serde_json::json;

    #[test]
    fn test_ok() {
        let output = HandlerOutput::ok(&json!({ "message": "No development instances to stop" }))
            .unwrap();
        assert_eq!(output.status_code, 200);
        assert_eq!(output.body, r#"{"message":"No development instances to stop"}"#);
    }

    #[test]
    fn test_error() {
        let output = HandlerOutput::error(&BudgetActionError::MissingRecord).unwrap();
        assert_eq!(output.status_code, 500);
        assert_eq!(output.body, r#""Error: Event contains no SNS record""#);
    }

    #[test]
    fn test_serialized_shape() {
        let output = HandlerOutput::ok("Slack notification sent successfully").unwrap();
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({
                "statusCode": 200,
                "body": "\"Slack notification sent successfully\""
            })
        );
    }
}
