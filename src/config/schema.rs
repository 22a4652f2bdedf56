use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::scoring::AlternativePolicy;

/// Default window for deciding whether a movie is still in theaters.
pub const DEFAULT_THEATER_WINDOW: &str = "7d";

/// One league's run configuration.
///
/// Example YAML:
/// ```yaml
/// year: 2025
/// name: "2025 Fantasy Box Office Standings"
/// draft_id: friends_2025
/// inputs:
///   revenue: revenue.json
///   picks: picks.yaml
///   rules: rules.yaml
/// analysis:
///   alternative_policy: undrafted_or_later
///   theater_window: "7d"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LeagueConfig {
    /// Release year the draft covers
    pub year: i32,

    /// Display name for the standings
    pub name: String,

    /// Unique identifier for the draft (e.g. "friends_2025")
    pub draft_id: String,

    pub inputs: InputPaths,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Input tables, relative to the config file unless absolute.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InputPaths {
    /// Revenue snapshot rows
    pub revenue: String,

    /// Draft picks
    pub picks: String,

    /// Multipliers and exclusions
    #[serde(default)]
    pub rules: Option<String>,

    /// Hand-entered revenue rows that replace snapshot records
    #[serde(default)]
    pub manual_adds: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Which movies count as available alternatives in worst-pick analysis
    #[serde(default)]
    pub alternative_policy: Option<AlternativePolicy>,

    /// humantime duration, e.g. "7d" or "2weeks"
    #[serde(default)]
    pub theater_window: Option<String>,
}

impl AnalysisConfig {
    pub fn policy(&self) -> AlternativePolicy {
        self.alternative_policy.unwrap_or_default()
    }

    pub fn theater_window(&self) -> Result<Duration> {
        let raw = self
            .theater_window
            .as_deref()
            .unwrap_or(DEFAULT_THEATER_WINDOW);
        humantime::parse_duration(raw.trim())
            .with_context(|| format!("invalid theater_window '{}'", raw))
    }
}
