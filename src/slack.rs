use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::alert::BudgetAlert;
use crate::severity::{AttachmentColor, ColorCutoffs, Severity, SeverityCutoffs};

pub const USERNAME: &str = "AWS Budget Monitor";
pub const ICON_EMOJI: &str = ":money_with_wings:";
const BUDGETS_DASHBOARD_URL: &str = "https://console.aws.amazon.com/billing/home#/budgets";
const COST_EXPLORER_URL: &str =
    "https://console.aws.amazon.com/cost-management/home#/cost-explorer";

/// Builds the Block Kit payload posted to the incoming webhook.
pub fn build_message(
    alert: &BudgetAlert,
    severity_cutoffs: &SeverityCutoffs,
    color_cutoffs: &ColorCutoffs,
    now: DateTime<Utc>,
) -> Value {
    let severity = Severity::classify(alert.threshold, severity_cutoffs);
    let color = AttachmentColor::classify(alert.threshold, color_cutoffs);

    json!({
        "username": USERNAME,
        "icon_emoji": ICON_EMOJI,
        "blocks": [
            {
                "type": "header",
                "text": plain_text(&format!("{} AWS Budget Alert", severity.emoji())),
            },
            fields(&[
                ("Budget Name", alert.budget_name.clone()),
                ("Severity", severity.label().to_string()),
            ]),
            fields(&[
                ("Threshold", format!("{}%", alert.threshold)),
                ("Current Usage", format!("{}%", alert.percentage)),
            ]),
            fields(&[
                ("Budget Limit", format_currency(alert.budget_limit)),
                ("Current Spend", format_currency(alert.current_spend)),
            ]),
            { "type": "divider" },
            markdown_section(severity.message()),
            markdown_section("*Recommended Actions:*"),
            markdown_section(&severity.recommended_actions_text()),
            {
                "type": "actions",
                "elements": [
                    {
                        "type": "button",
                        "text": plain_text("View Budget Dashboard"),
                        "url": BUDGETS_DASHBOARD_URL,
                        "style": "primary",
                    },
                    {
                        "type": "button",
                        "text": plain_text("Cost Explorer"),
                        "url": COST_EXPLORER_URL,
                    },
                ],
            },
            {
                "type": "context",
                "elements": [
                    {
                        "type": "mrkdwn",
                        "text": format!(
                            "Alert triggered at {} | Automated notification from AWS Lambda",
                            now.format("%Y-%m-%d %H:%M:%S UTC")
                        ),
                    },
                ],
            },
        ],
        "attachments": [
            {
                "color": color.hex(),
                "text": color.text(),
            },
        ],
    })
}

fn plain_text(text: &str) -> Value {
    json!({ "type": "plain_text", "text": text, "emoji": true })
}

fn markdown_section(text: &str) -> Value {
    json!({ "type": "section", "text": { "type": "mrkdwn", "text": text } })
}

fn fields(pairs: &[(&str, String)]) -> Value {
    let fields: Vec<Value> = pairs
        .iter()
        .map(|(title, value)| json!({ "type": "mrkdwn", "text": format!("*{}:*\n{}", title, value) }))
        .collect();
    json!({ "type": "section", "fields": fields })
}

/// Dollar amount with thousands separators and two decimals, e.g. `$42,500.00`.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_at(fixed.len() - 3);

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("${}{}{}", sign, grouped, cents)
}
