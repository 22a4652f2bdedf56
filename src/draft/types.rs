use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric cell as it arrives from a spreadsheet export or a scraper dump.
///
/// Either a real number or free text such as `"$1,234,567"`. Parsing never
/// fails loudly: callers get `None` and decide on a fallback.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Parse as a finite number. Currency symbols, thousands separators and
    /// whitespace are ignored.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
            RawValue::Text(s) => {
                let cleaned: String = s
                    .chars()
                    .filter(|c| !matches!(c, '$' | ',' | '_') && !c.is_whitespace())
                    .collect();
                if cleaned.is_empty() {
                    return None;
                }
                cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
    }

    /// Parse as whole dollars. Negative amounts are malformed.
    pub fn as_revenue(&self) -> Option<u64> {
        self.as_f64()
            .filter(|n| *n >= 0.0)
            .map(|n| n.round() as u64)
    }

    /// Parse as a positive integer (round and pick numbers).
    pub fn as_positive_int(&self) -> Option<u32> {
        let n = self.as_f64()?;
        if n >= 1.0 && n.fract() == 0.0 && n <= u32::MAX as f64 {
            Some(n as u32)
        } else {
            None
        }
    }

    /// True when the cell was present but blank.
    pub fn is_blank(&self) -> bool {
        matches!(self, RawValue::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One row of the revenue snapshot. The same title usually appears once per
/// data refresh.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RevenueObservation {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "domestic_rev")]
    pub domestic_revenue: Option<RawValue>,
    #[serde(default, alias = "foreign_rev")]
    pub foreign_revenue: Option<RawValue>,
    #[serde(default, alias = "revenue")]
    pub total_revenue: Option<RawValue>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub first_seen_date: Option<NaiveDate>,
    #[serde(default, alias = "published_timestamp_utc")]
    pub published_timestamp: Option<DateTime<Utc>>,
}

/// A hand-entered revenue row for titles the snapshot is missing or gets wrong.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ManualAdd {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "total_revenue")]
    pub revenue: Option<RawValue>,
    #[serde(default, alias = "domestic_rev")]
    pub domestic_revenue: Option<RawValue>,
    #[serde(default, alias = "foreign_rev")]
    pub foreign_revenue: Option<RawValue>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

/// A draft pick as read from the draft sheet, before validation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RawPick {
    #[serde(default, alias = "name")]
    pub drafter_name: Option<String>,
    #[serde(default, alias = "movie")]
    pub movie_title: Option<String>,
    #[serde(default, alias = "round")]
    pub round_number: Option<RawValue>,
    #[serde(default, alias = "overall_pick")]
    pub overall_pick_number: Option<RawValue>,
}

/// A validated draft pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftPick {
    pub drafter_name: String,
    pub movie_title: String,
    pub round_number: u32,
    pub overall_pick_number: u32,
}

/// One row of the multipliers-and-exclusions sheet.
///
/// `rule_type` is one of `movie_override`, `round_default` or `exclusion`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RuleRow {
    #[serde(default, alias = "type")]
    pub rule_type: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default, alias = "multiplier")]
    pub value: Option<RawValue>,
}

/// Canonical revenue for one title after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueRecord {
    pub title: String,
    pub domestic_revenue: u64,
    pub foreign_revenue: u64,
    pub total_revenue: u64,
    pub release_year: Option<i32>,
    pub first_seen_date: Option<NaiveDate>,
    pub last_updated_timestamp: Option<DateTime<Utc>>,
    pub still_in_theaters: bool,
    /// Came from the manual adds sheet rather than the snapshot
    pub manual: bool,
}

/// Everything one league run reads, already materialized.
#[derive(Debug, Clone, Default)]
pub struct DraftInputs {
    pub revenue: Vec<RevenueObservation>,
    pub manual_adds: Vec<ManualAdd>,
    pub picks: Vec<RawPick>,
    pub rules: Vec<RuleRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_number() {
        assert_eq!(RawValue::Number(2.5).as_f64(), Some(2.5));
        assert_eq!(RawValue::Number(f64::NAN).as_f64(), None);
    }

    #[test]
    fn test_raw_currency_text() {
        let value = RawValue::Text("$1,234,567".to_string());
        assert_eq!(value.as_revenue(), Some(1_234_567));
    }

    #[test]
    fn test_raw_garbage_text() {
        assert_eq!(RawValue::Text("abc".to_string()).as_f64(), None);
        assert_eq!(RawValue::Text("   ".to_string()).as_f64(), None);
        assert_eq!(RawValue::Text("nan".to_string()).as_f64(), None);
    }

    #[test]
    fn test_negative_revenue_is_malformed() {
        assert_eq!(RawValue::Number(-5.0).as_revenue(), None);
    }

    #[test]
    fn test_positive_int() {
        assert_eq!(RawValue::Text("3".to_string()).as_positive_int(), Some(3));
        assert_eq!(RawValue::Number(0.0).as_positive_int(), None);
        assert_eq!(RawValue::Number(2.5).as_positive_int(), None);
    }

    #[test]
    fn test_observation_parse_with_aliases() {
        let yaml = r#"
- title: "Movie A"
  revenue: "$100,000"
  domestic_rev: 60000
  foreign_rev: 40000
  release_year: 2025
  published_timestamp: "2025-06-01T00:00:00Z"
"#;
        let rows: Vec<RevenueObservation> = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Movie A");
        assert_eq!(
            rows[0].total_revenue.as_ref().and_then(RawValue::as_revenue),
            Some(100_000)
        );
        assert_eq!(
            rows[0].domestic_revenue.as_ref().and_then(RawValue::as_revenue),
            Some(60_000)
        );
        assert!(rows[0].published_timestamp.is_some());
    }

    #[test]
    fn test_pick_parse_from_sheet_columns() {
        let json = r#"[{"name": "Alice", "movie": "Movie A", "round": "1", "overall_pick": 1}]"#;
        let rows: Vec<RawPick> = serde_json::from_str(json).unwrap();
        assert_eq!(rows[0].drafter_name.as_deref(), Some("Alice"));
        assert_eq!(rows[0].movie_title.as_deref(), Some("Movie A"));
        assert_eq!(
            rows[0].round_number.as_ref().and_then(RawValue::as_positive_int),
            Some(1)
        );
    }
}
