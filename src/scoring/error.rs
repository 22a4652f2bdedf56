use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Failures that stop a league run. Nothing partial is emitted.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("invalid league config: {}", .problems.join("; "))]
    InvalidConfig { problems: Vec<String> },

    #[error("{draft_id}: {} schema violation(s): {}", .violations.len(), .violations.join("; "))]
    SchemaViolation {
        draft_id: String,
        violations: Vec<String>,
    },
}

/// Problems recovered from during a run. The run still completes and the
/// affected movie shows up with a safe default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputIssue {
    /// A number that could not be parsed, replaced by its default
    MalformedValue {
        location: String,
        value: String,
        fallback: String,
    },
    /// A drafted title with no revenue record; scored as $0
    MissingMovie { title: String },
    /// A drafted title whose record predates the latest pull and sits at or
    /// below that pull's smallest revenue
    StaleRevenue {
        title: String,
        revenue: u64,
        latest_minimum: u64,
    },
}

impl fmt::Display for InputIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputIssue::MalformedValue {
                location,
                value,
                fallback,
            } => write!(f, "{}: could not parse '{}', using {}", location, value, fallback),
            InputIssue::MissingMovie { title } => {
                write!(f, "'{}' is drafted but has no revenue record", title)
            }
            InputIssue::StaleRevenue {
                title,
                revenue,
                latest_minimum,
            } => write!(
                f,
                "'{}' revenue {} is not in the latest pull and is at or below its minimum {}",
                title, revenue, latest_minimum
            ),
        }
    }
}
