use std::error::Error;

use rusoto_core::RusotoError;
use rusoto_ec2::{CreateTagsError, DescribeInstancesError, StopInstancesError};
use rusoto_sns::PublishError;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum BudgetActionError {
    NoneValue,
    MissingRecord,
    Configuration(String),
    Json(serde_json::Error),
    DescribeInstances(RusotoError<DescribeInstancesError>),
    StopInstances(RusotoError<StopInstancesError>),
    CreateTags(RusotoError<CreateTagsError>),
    Publish(RusotoError<PublishError>),
    Webhook(reqwest::Error),
    WebhookStatus { status: u16, body: String },
}

impl BudgetActionError {
    /// Errors raised while reading the inbound event rather than talking to AWS or Slack.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            *self,
            BudgetActionError::Json(_) | BudgetActionError::MissingRecord
        )
    }
}

impl Display for BudgetActionError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            BudgetActionError::NoneValue => write!(f, "Value is None"),
            BudgetActionError::MissingRecord => write!(f, "Event contains no SNS record"),
            BudgetActionError::Configuration(ref message) => {
                write!(f, "Configuration error: {}", message)
            }
            BudgetActionError::Json(ref error) => write!(f, "Invalid JSON: {}", error),
            BudgetActionError::DescribeInstances(ref error) => {
                write!(f, "Failed to describe instances: {}", error)
            }
            BudgetActionError::StopInstances(ref error) => {
                write!(f, "Failed to stop instances: {}", error)
            }
            BudgetActionError::CreateTags(ref error) => {
                write!(f, "Failed to tag instances: {}", error)
            }
            BudgetActionError::Publish(ref error) => {
                write!(f, "Failed to publish notification: {}", error)
            }
            BudgetActionError::Webhook(ref error) => {
                write!(f, "Failed to send Slack notification: {}", error)
            }
            BudgetActionError::WebhookStatus { status, ref body } => write!(
                f,
                "Failed to send Slack notification. Status: {}, response: {}",
                status, body
            ),
        }
    }
}

impl Error for BudgetActionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            BudgetActionError::Json(ref error) => Some(error),
            BudgetActionError::DescribeInstances(ref error) => Some(error),
            BudgetActionError::StopInstances(ref error) => Some(error),
            BudgetActionError::CreateTags(ref error) => Some(error),
            BudgetActionError::Publish(ref error) => Some(error),
            BudgetActionError::Webhook(ref error) => Some(error),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for BudgetActionError {
    fn from(e: serde_json::Error) -> BudgetActionError {
        BudgetActionError::Json(e)
    }
}

impl From<RusotoError<DescribeInstancesError>> for BudgetActionError {
    fn from(e: RusotoError<DescribeInstancesError>) -> BudgetActionError {
        BudgetActionError::DescribeInstances(e)
    }
}

impl From<RusotoError<StopInstancesError>> for BudgetActionError {
    fn from(e: RusotoError<StopInstancesError>) -> BudgetActionError {
        BudgetActionError::StopInstances(e)
    }
}

impl From<RusotoError<CreateTagsError>> for BudgetActionError {
    fn from(e: RusotoError<CreateTagsError>) -> BudgetActionError {
        BudgetActionError::CreateTags(e)
    }
}

impl From<RusotoError<PublishError>> for BudgetActionError {
    fn from(e: RusotoError<PublishError>) -> BudgetActionError {
        BudgetActionError::Publish(e)
    }
}

impl From<reqwest::Error> for BudgetActionError {
    fn from(e: reqwest::Error) -> BudgetActionError {
        BudgetActionError::Webhook(e)
    }
}
