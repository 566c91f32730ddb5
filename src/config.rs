use std::env;

use once_cell::sync::Lazy;
use rusoto_core::Region;

use crate::error::BudgetActionError;
use crate::severity::{ColorCutoffs, SeverityCutoffs};

pub const SNS_TOPIC_ARN: &str = "SNS_TOPIC_ARN";
pub const STOP_REGIONS: &str = "STOP_REGIONS";
pub const SLACK_WEBHOOK_URL: &str = "SLACK_WEBHOOK_URL";

/// Tag key matched against [`DEVELOPMENT_TAG_VALUES`].
pub const ENVIRONMENT_TAG: &str = "Environment";
pub const DEVELOPMENT_TAG_VALUES: [&str; 4] = ["Development", "development", "dev", "Dev"];

pub static DEFAULT_REGIONS: Lazy<Vec<Region>> = Lazy::new(|| {
    vec![
        Region::UsEast1,
        Region::UsEast2,
        Region::UsWest1,
        Region::UsWest2,
        Region::EuWest1,
        Region::EuCentral1,
        Region::ApSoutheast1,
        Region::ApNortheast1,
    ]
});

#[derive(Debug, Clone, PartialEq)]
pub struct StopConfig {
    pub regions: Vec<Region>,
    pub tag_values: Vec<String>,
    pub topic_arn: Option<String>,
}

impl Default for StopConfig {
    fn default() -> Self {
        Self {
            regions: DEFAULT_REGIONS.clone(),
            tag_values: DEVELOPMENT_TAG_VALUES
                .iter()
                .map(|value| value.to_string())
                .collect(),
            topic_arn: None,
        }
    }
}

impl StopConfig {
    pub fn from_env() -> Result<Self, BudgetActionError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, BudgetActionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let regions = match non_empty(var(STOP_REGIONS)) {
            Some(list) => parse_regions(&list)?,
            None => DEFAULT_REGIONS.clone(),
        };
        Ok(Self {
            regions,
            topic_arn: non_empty(var(SNS_TOPIC_ARN)),
            ..Self::default()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RelayConfig {
    pub webhook_url: Option<String>,
    pub severity: SeverityCutoffs,
    pub colors: ColorCutoffs,
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            webhook_url: non_empty(var(SLACK_WEBHOOK_URL)),
            ..Self::default()
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn parse_regions(list: &str) -> Result<Vec<Region>, BudgetActionError> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            name.parse::<Region>().map_err(|error| {
                BudgetActionError::Configuration(format!("{} in {}: {}", name, STOP_REGIONS, error))
            })
        })
        .collect()
}
