use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use std::collections::BTreeMap;
use tracing::debug;

use super::error::InputIssue;
use crate::draft::{ManualAdd, RawValue, RevenueObservation, RevenueRecord};

/// One canonical revenue record per title, plus facts about the snapshot as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRevenue {
    pub records: BTreeMap<String, RevenueRecord>,
    /// Latest publish time in the snapshot; the run's notion of "now"
    pub as_of: Option<DateTime<Utc>>,
    /// Smallest total among records from the latest pull
    pub latest_minimum: Option<u64>,
}

impl NormalizedRevenue {
    pub fn get(&self, title: &str) -> Option<&RevenueRecord> {
        self.records.get(title)
    }
}

struct Amounts {
    domestic: u64,
    foreign: u64,
    total: u64,
}

fn read_revenue(
    raw: Option<&RawValue>,
    location: &str,
    field: &str,
    issues: &mut Vec<InputIssue>,
) -> Option<u64> {
    let raw = raw.filter(|r| !r.is_blank())?;
    let value = raw.as_revenue();
    if value.is_none() {
        issues.push(InputIssue::MalformedValue {
            location: format!("{} {}", location, field),
            value: raw.to_string(),
            fallback: "0".to_string(),
        });
    }
    value
}

fn amounts(
    domestic: Option<&RawValue>,
    foreign: Option<&RawValue>,
    total: Option<&RawValue>,
    location: &str,
    issues: &mut Vec<InputIssue>,
) -> Amounts {
    let domestic = read_revenue(domestic, location, "domestic_revenue", issues).unwrap_or(0);
    let foreign = read_revenue(foreign, location, "foreign_revenue", issues).unwrap_or(0);
    let total = read_revenue(total, location, "total_revenue", issues)
        .filter(|t| *t > 0)
        .unwrap_or_else(|| domestic.saturating_add(foreign));
    Amounts {
        domestic,
        foreign,
        total,
    }
}

fn observation_amounts(obs: &RevenueObservation, issues: &mut Vec<InputIssue>) -> Amounts {
    let location = format!("revenue '{}'", obs.title.trim());
    amounts(
        obs.domestic_revenue.as_ref(),
        obs.foreign_revenue.as_ref(),
        obs.total_revenue.as_ref(),
        &location,
        issues,
    )
}

fn observation_total(obs: &RevenueObservation) -> u64 {
    observation_amounts(obs, &mut Vec::new()).total
}

fn still_in_theaters(
    group: &[&RevenueObservation],
    latest_total: u64,
    first_seen: Option<NaiveDate>,
    as_of: Option<DateTime<Utc>>,
    window: Duration,
) -> bool {
    let Some(as_of) = as_of else {
        return false;
    };
    let Some(cutoff) = as_of.checked_sub_signed(window) else {
        return true;
    };
    if matches!(first_seen, Some(d) if d >= cutoff.date_naive()) {
        return true;
    }

    let baseline = group
        .iter()
        .filter(|o| matches!(o.published_timestamp, Some(t) if t <= cutoff))
        .max_by_key(|o| o.published_timestamp);
    match baseline {
        Some(obs) => observation_total(obs) != latest_total,
        None => true,
    }
}

/// Reduce a raw snapshot to one record per title.
///
/// The most recently published observation wins; on equal timestamps the
/// later-loaded row wins. Rows for other release years are dropped. Manual
/// adds replace whatever the snapshot had for the same title.
pub fn normalize_revenue(
    observations: &[RevenueObservation],
    manual_adds: &[ManualAdd],
    year: i32,
    theater_window: Duration,
    issues: &mut Vec<InputIssue>,
) -> NormalizedRevenue {
    let mut by_title: BTreeMap<&str, Vec<&RevenueObservation>> = BTreeMap::new();
    let mut dropped = 0usize;
    for obs in observations {
        if matches!(obs.release_year, Some(y) if y != year) {
            dropped += 1;
            continue;
        }
        let title = obs.title.trim();
        if title.is_empty() {
            continue;
        }
        by_title.entry(title).or_default().push(obs);
    }

    let as_of = by_title
        .values()
        .flatten()
        .filter_map(|o| o.published_timestamp)
        .max();

    let mut records = BTreeMap::new();
    for (title, group) in &by_title {
        let Some(latest) = group.iter().max_by_key(|o| o.published_timestamp) else {
            continue;
        };
        let amounts = observation_amounts(latest, issues);
        let first_seen_date = group
            .iter()
            .filter_map(|o| {
                o.first_seen_date
                    .or_else(|| o.published_timestamp.map(|t| t.date_naive()))
            })
            .min();

        records.insert(
            title.to_string(),
            RevenueRecord {
                title: title.to_string(),
                domestic_revenue: amounts.domestic,
                foreign_revenue: amounts.foreign,
                total_revenue: amounts.total,
                release_year: latest.release_year,
                first_seen_date,
                last_updated_timestamp: latest.published_timestamp,
                still_in_theaters: still_in_theaters(
                    group,
                    amounts.total,
                    first_seen_date,
                    as_of,
                    theater_window,
                ),
                manual: false,
            },
        );
    }

    let latest_minimum = as_of.and_then(|as_of| {
        records
            .values()
            .filter(|r| r.last_updated_timestamp == Some(as_of))
            .map(|r| r.total_revenue)
            .min()
    });

    for add in manual_adds {
        let title = add.title.trim();
        if title.is_empty() {
            continue;
        }
        let location = format!("manual_adds '{}'", title);
        let amounts = amounts(
            add.domestic_revenue.as_ref(),
            add.foreign_revenue.as_ref(),
            add.revenue.as_ref(),
            &location,
            issues,
        );
        let still_in_theaters = match (add.release_date, as_of) {
            (Some(released), Some(as_of)) => as_of
                .checked_sub_signed(theater_window)
                .map_or(true, |cutoff| released >= cutoff.date_naive()),
            _ => false,
        };
        records.insert(
            title.to_string(),
            RevenueRecord {
                title: title.to_string(),
                domestic_revenue: amounts.domestic,
                foreign_revenue: amounts.foreign,
                total_revenue: amounts.total,
                release_year: add.release_date.map(|d| d.year()),
                first_seen_date: add.release_date,
                last_updated_timestamp: None,
                still_in_theaters,
                manual: true,
            },
        );
    }

    debug!(
        observations = observations.len(),
        dropped_other_years = dropped,
        titles = records.len(),
        manual = manual_adds.len(),
        "normalized revenue snapshot"
    );

    NormalizedRevenue {
        records,
        as_of,
        latest_minimum,
    }
}
