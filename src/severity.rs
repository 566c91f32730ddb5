//! Threshold classification for budget alerts.
//!
//! Severity tiers and attachment colors use separate cutoffs: a threshold of 87
//! is a [`Severity::Medium`] alert rendered with a [`AttachmentColor::Yellow`]
//! attachment.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityCutoffs {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
}

impl Default for SeverityCutoffs {
    fn default() -> Self {
        Self {
            critical: 100.0,
            high: 90.0,
            medium: 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorCutoffs {
    pub red: f64,
    pub yellow: f64,
}

impl Default for ColorCutoffs {
    fn default() -> Self {
        Self {
            red: 100.0,
            yellow: 85.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

const CRITICAL_ACTIONS: [&str; 5] = [
    "🛑 Stop all non-critical workloads immediately",
    "🔍 Review Cost Explorer for unexpected charges",
    "📧 Notify department head and finance team",
    "🔒 Enable spending controls via Budget Actions",
    "📊 Schedule emergency cost review meeting",
];

const HIGH_ACTIONS: [&str; 5] = [
    "🔍 Analyze current spending patterns in Cost Explorer",
    "💰 Identify and stop unused resources",
    "📊 Review Reserved Instance utilization",
    "⚙️ Implement cost optimization recommendations",
    "📧 Alert team leads of spending situation",
];

const MEDIUM_ACTIONS: [&str; 5] = [
    "📊 Monitor daily spending trends",
    "🔍 Review recent resource deployments",
    "💾 Check for over-provisioned resources",
    "🔄 Consider auto-scaling adjustments",
    "📝 Update forecasts and projections",
];

const LOW_ACTIONS: [&str; 4] = [
    "📈 Continue monitoring spending trends",
    "🔍 Regular cost optimization reviews",
    "📝 Update team on budget status",
    "✅ Maintain current cost controls",
];

impl Severity {
    /// Tiers are closed below: a threshold equal to a cutoff belongs to the higher tier.
    pub fn classify(threshold: f64, cutoffs: &SeverityCutoffs) -> Self {
        if threshold >= cutoffs.critical {
            Severity::Critical
        } else if threshold >= cutoffs.high {
            Severity::High
        } else if threshold >= cutoffs.medium {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Critical => "🔴 CRITICAL",
            Severity::High => "🟠 HIGH",
            Severity::Medium => "🟡 MEDIUM",
            Severity::Low => "🟢 LOW",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Severity::Critical => "🚨",
            Severity::High => "⚠️",
            Severity::Medium => "⚡",
            Severity::Low => "ℹ️",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Severity::Critical => {
                "⚠️ *CRITICAL ALERT:* Your budget limit has been exceeded! Immediate action required."
            }
            Severity::High => {
                "⚠️ *HIGH ALERT:* You are very close to exceeding your budget limit."
            }
            Severity::Medium => {
                "⚡ *MEDIUM ALERT:* Your spending is trending towards the budget limit."
            }
            Severity::Low => "ℹ️ *INFO:* Budget threshold reached. Monitoring recommended.",
        }
    }

    pub fn recommended_actions(self) -> &'static [&'static str] {
        match self {
            Severity::Critical => &CRITICAL_ACTIONS,
            Severity::High => &HIGH_ACTIONS,
            Severity::Medium => &MEDIUM_ACTIONS,
            Severity::Low => &LOW_ACTIONS,
        }
    }

    /// Slack mrkdwn bullet list, one action per line.
    pub fn recommended_actions_text(self) -> String {
        self.recommended_actions()
            .iter()
            .map(|action| format!("• {}", action))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentColor {
    Red,
    Yellow,
    Blue,
}

impl AttachmentColor {
    pub fn classify(threshold: f64, cutoffs: &ColorCutoffs) -> Self {
        if threshold >= cutoffs.red {
            AttachmentColor::Red
        } else if threshold >= cutoffs.yellow {
            AttachmentColor::Yellow
        } else {
            AttachmentColor::Blue
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            AttachmentColor::Red => "#dc3545",
            AttachmentColor::Yellow => "#ffc107",
            AttachmentColor::Blue => "#17a2b8",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            AttachmentColor::Red => "⚠️ CRITICAL: Budget limit exceeded!",
            AttachmentColor::Yellow => "⚠️ WARNING: Approaching budget limit",
            AttachmentColor::Blue => "ℹ️ INFO: Budget threshold reached",
        }
    }
}
