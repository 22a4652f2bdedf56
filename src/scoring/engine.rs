use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

use super::error::InputIssue;
use super::multiplier::RuleSet;
use super::normalize::NormalizedRevenue;
use crate::draft::DraftPick;

/// One movie after scoring, drafted or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEntry {
    pub title: String,
    pub drafted_by: Option<String>,
    pub round: Option<u32>,
    pub overall_pick: Option<u32>,
    pub revenue: u64,
    pub domestic_revenue: u64,
    pub foreign_revenue: u64,
    pub multiplier: f64,
    pub scored_revenue: f64,
    /// Matched an exclusion rule: scored as $0 and left out of ranking
    pub excluded: bool,
    /// Drafted but absent from the snapshot and manual adds
    pub missing: bool,
    pub first_seen_date: Option<NaiveDate>,
    pub still_in_theaters: bool,
    /// Position by scored revenue among non-excluded movies, 1 = best
    pub revenue_order_rank: Option<u32>,
}

impl ScoredEntry {
    pub fn is_drafted(&self) -> bool {
        self.drafted_by.is_some()
    }

    pub fn is_released(&self) -> bool {
        self.revenue > 0
    }

    /// Drafted and not excluded: counts toward standings and pick analysis.
    pub fn counts_for_drafter(&self) -> bool {
        self.is_drafted() && !self.excluded
    }
}

/// Score every drafted pick and every undrafted movie in the snapshot.
///
/// `scored_revenue = revenue * multiplier`, forced to 0 for excluded movies.
/// Drafted titles without a revenue record score 0 and are reported.
/// Entries come back in draft order, followed by undrafted movies by title.
pub fn score_movies(
    revenue: &NormalizedRevenue,
    picks: &[DraftPick],
    rules: &RuleSet,
    issues: &mut Vec<InputIssue>,
) -> Vec<ScoredEntry> {
    let mut entries = Vec::with_capacity(picks.len() + revenue.records.len());
    let mut drafted = BTreeSet::new();

    for pick in picks {
        let title = pick.movie_title.as_str();
        drafted.insert(title);

        let record = revenue.get(title);
        if record.is_none() {
            issues.push(InputIssue::MissingMovie {
                title: title.to_string(),
            });
        }

        let multiplier = rules.resolve(Some(pick.round_number), title);
        let excluded = rules.is_excluded(title);
        let amount = record.map_or(0, |r| r.total_revenue);

        entries.push(ScoredEntry {
            title: title.to_string(),
            drafted_by: Some(pick.drafter_name.clone()),
            round: Some(pick.round_number),
            overall_pick: Some(pick.overall_pick_number),
            revenue: amount,
            domestic_revenue: record.map_or(0, |r| r.domestic_revenue),
            foreign_revenue: record.map_or(0, |r| r.foreign_revenue),
            multiplier,
            scored_revenue: scored(amount, multiplier, excluded),
            excluded,
            missing: record.is_none(),
            first_seen_date: record.and_then(|r| r.first_seen_date),
            still_in_theaters: record.is_some_and(|r| r.still_in_theaters),
            revenue_order_rank: None,
        });
    }

    for record in revenue.records.values() {
        if drafted.contains(record.title.as_str()) {
            continue;
        }
        let multiplier = rules.resolve(None, &record.title);
        let excluded = rules.is_excluded(&record.title);

        entries.push(ScoredEntry {
            title: record.title.clone(),
            drafted_by: None,
            round: None,
            overall_pick: None,
            revenue: record.total_revenue,
            domestic_revenue: record.domestic_revenue,
            foreign_revenue: record.foreign_revenue,
            multiplier,
            scored_revenue: scored(record.total_revenue, multiplier, excluded),
            excluded,
            missing: false,
            first_seen_date: record.first_seen_date,
            still_in_theaters: record.still_in_theaters,
            revenue_order_rank: None,
        });
    }

    entries
}

/// Scored revenue is kept in whole dollars so totals add up exactly in any order.
fn scored(revenue: u64, multiplier: f64, excluded: bool) -> f64 {
    if excluded {
        0.0
    } else {
        (revenue as f64 * multiplier).round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{RawValue, RevenueRecord, RuleRow};
    use std::collections::BTreeMap;

    fn record(title: &str, total: u64) -> RevenueRecord {
        RevenueRecord {
            title: title.to_string(),
            domestic_revenue: total / 2,
            foreign_revenue: total - total / 2,
            total_revenue: total,
            release_year: Some(2025),
            first_seen_date: None,
            last_updated_timestamp: None,
            still_in_theaters: false,
            manual: false,
        }
    }

    fn snapshot(records: Vec<RevenueRecord>) -> NormalizedRevenue {
        NormalizedRevenue {
            records: records
                .into_iter()
                .map(|r| (r.title.clone(), r))
                .collect::<BTreeMap<_, _>>(),
            as_of: None,
            latest_minimum: None,
        }
    }

    fn pick(drafter: &str, title: &str, round: u32, overall: u32) -> DraftPick {
        DraftPick {
            drafter_name: drafter.to_string(),
            movie_title: title.to_string(),
            round_number: round,
            overall_pick_number: overall,
        }
    }

    fn rules(rows: Vec<RuleRow>) -> RuleSet {
        RuleSet::from_rows(&rows, &mut Vec::new()).unwrap()
    }

    fn rule(rule_type: &str, target: &str, value: Option<f64>) -> RuleRow {
        RuleRow {
            rule_type: Some(rule_type.to_string()),
            target: Some(target.to_string()),
            value: value.map(RawValue::Number),
        }
    }

    #[test]
    fn test_drafted_pick_uses_round_multiplier() {
        let revenue = snapshot(vec![record("Movie A", 100)]);
        let picks = vec![pick("Alice", "Movie A", 1, 1)];
        let entries = score_movies(
            &revenue,
            &picks,
            &rules(vec![rule("round_default", "1", Some(2.0))]),
            &mut Vec::new(),
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].multiplier, 2.0);
        assert_eq!(entries[0].scored_revenue, 200.0);
        assert_eq!(entries[0].drafted_by.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_fractional_multiplier_scores_whole_dollars() {
        let revenue = snapshot(vec![record("Movie A", 101), record("Movie B", 10)]);
        let picks = vec![pick("Alice", "Movie A", 1, 1), pick("Bob", "Movie B", 1, 2)];
        let entries = score_movies(
            &revenue,
            &picks,
            &rules(vec![
                rule("movie_override", "Movie A", Some(1.5)),
                rule("movie_override", "Movie B", Some(1.1)),
            ]),
            &mut Vec::new(),
        );
        let a = entries.iter().find(|e| e.title == "Movie A").unwrap();
        let b = entries.iter().find(|e| e.title == "Movie B").unwrap();
        assert_eq!(a.scored_revenue, 152.0);
        assert_eq!(b.scored_revenue, 11.0);
    }

    #[test]
    fn test_undrafted_movies_are_scored() {
        let revenue = snapshot(vec![record("Movie A", 100), record("Movie D", 50)]);
        let picks = vec![pick("Alice", "Movie A", 1, 1)];
        let entries = score_movies(
            &revenue,
            &picks,
            &rules(vec![rule("movie_override", "Movie D", Some(3.0))]),
            &mut Vec::new(),
        );
        assert_eq!(entries.len(), 2);
        let undrafted = &entries[1];
        assert_eq!(undrafted.title, "Movie D");
        assert!(!undrafted.is_drafted());
        assert_eq!(undrafted.scored_revenue, 150.0);
    }

    #[test]
    fn test_missing_movie_scores_zero() {
        let revenue = snapshot(vec![]);
        let picks = vec![pick("Alice", "Unreleased", 1, 1)];
        let mut issues = Vec::new();
        let entries = score_movies(&revenue, &picks, &RuleSet::default(), &mut issues);
        assert_eq!(entries[0].revenue, 0);
        assert_eq!(entries[0].scored_revenue, 0.0);
        assert!(entries[0].missing);
        assert_eq!(
            issues,
            vec![InputIssue::MissingMovie {
                title: "Unreleased".to_string()
            }]
        );
    }

    #[test]
    fn test_excluded_movie_scores_zero() {
        let revenue = snapshot(vec![record("Movie A", 100), record("Movie X", 900)]);
        let picks = vec![pick("Alice", "Movie A", 1, 1)];
        let entries = score_movies(
            &revenue,
            &picks,
            &rules(vec![
                rule("exclusion", "Movie A", None),
                rule("exclusion", "Movie X", None),
                rule("movie_override", "Movie A", Some(5.0)),
            ]),
            &mut Vec::new(),
        );
        assert!(entries.iter().all(|e| e.excluded && e.scored_revenue == 0.0));
        assert_eq!(entries[0].revenue, 100);
        assert!(!entries[0].counts_for_drafter());
    }
}
