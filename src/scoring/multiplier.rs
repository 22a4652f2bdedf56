use std::collections::BTreeMap;

use super::error::InputIssue;
use super::rules::{parse_multiplier, RangeOp};
use crate::draft::RuleRow;

/// Multiplier used when no rule applies.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

#[derive(Debug, Clone)]
struct RoundDefault {
    range: RangeOp,
    multiplier: f64,
}

#[derive(Debug, Clone)]
struct Exclusion {
    target: String,
    pattern: Option<glob::Pattern>,
}

impl Exclusion {
    fn new(target: &str) -> Self {
        let target = target.to_lowercase();
        let pattern = if target.contains(['*', '?', '[']) {
            glob::Pattern::new(&target).ok()
        } else {
            None
        };
        Self { target, pattern }
    }

    fn matches(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        title == self.target || self.pattern.as_ref().is_some_and(|p| p.matches(&title))
    }
}

/// Multiplier overrides, round defaults and exclusions for one league.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    overrides: BTreeMap<String, f64>,
    round_defaults: Vec<RoundDefault>,
    exclusions: Vec<Exclusion>,
}

impl RuleSet {
    /// Build from the rules sheet. Malformed multiplier values are dropped
    /// and reported as issues; structural problems are returned as errors.
    pub fn from_rows(rows: &[RuleRow], issues: &mut Vec<InputIssue>) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();
        let mut rules = RuleSet::default();

        for (i, row) in rows.iter().enumerate() {
            let rule_type = row.rule_type.as_deref().map(str::trim).unwrap_or("");
            let target = row.target.as_deref().map(str::trim).unwrap_or("");
            if target.is_empty() {
                errors.push(format!("rules[{}].target: required", i));
                continue;
            }

            let mut multiplier = || {
                let value = row.value.as_ref().and_then(parse_multiplier);
                if value.is_none() {
                    issues.push(InputIssue::MalformedValue {
                        location: format!("rules[{}] {} '{}'", i, rule_type, target),
                        value: row
                            .value
                            .as_ref()
                            .map(|v| v.to_string())
                            .unwrap_or_default(),
                        fallback: "next rule".to_string(),
                    });
                }
                value
            };

            match rule_type {
                "movie_override" => {
                    if let Some(value) = multiplier() {
                        rules.overrides.insert(target.to_string(), value);
                    }
                }
                "round_default" => match RangeOp::parse(target) {
                    Ok(range) => {
                        if let Some(value) = multiplier() {
                            rules.round_defaults.push(RoundDefault {
                                range,
                                multiplier: value,
                            });
                        }
                    }
                    Err(e) => errors.push(format!(
                        "rules[{}].target: invalid round '{}' - {}",
                        i, target, e
                    )),
                },
                "exclusion" => rules.exclusions.push(Exclusion::new(target)),
                other => errors.push(format!(
                    "rules[{}].rule_type: expected movie_override, round_default or exclusion, got '{}'",
                    i, other
                )),
            }
        }

        if errors.is_empty() {
            Ok(rules)
        } else {
            Err(errors)
        }
    }

    fn round_default(&self, round: u32) -> Option<f64> {
        self.round_defaults
            .iter()
            .find(|r| r.range.matches(round))
            .map(|r| r.multiplier)
    }

    /// Effective multiplier for a movie, optionally drafted in `round`.
    ///
    /// Resolution order: movie override, then the first round default that
    /// matches, then 1.0.
    pub fn resolve(&self, round: Option<u32>, title: &str) -> f64 {
        self.overrides
            .get(title)
            .copied()
            .or_else(|| round.and_then(|r| self.round_default(r)))
            .unwrap_or(DEFAULT_MULTIPLIER)
    }

    /// Whether a title is excluded from scoring. Matching is case-insensitive
    /// and targets may be glob patterns.
    pub fn is_excluded(&self, title: &str) -> bool {
        self.exclusions.iter().any(|e| e.matches(title))
    }
}
