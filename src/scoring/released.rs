use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::engine::ScoredEntry;
use super::picks::WorstPick;

/// A movie that has opened, with its draft context and best missed alternative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleasedMovie {
    pub rank: Option<u32>,
    pub title: String,
    pub drafted_by: Option<String>,
    pub revenue: u64,
    pub scored_revenue: f64,
    pub round: Option<u32>,
    pub overall_pick: Option<u32>,
    pub multiplier: f64,
    pub domestic_revenue: u64,
    pub domestic_pct: f64,
    pub foreign_revenue: u64,
    pub foreign_pct: f64,
    pub better_pick_title: Option<String>,
    pub better_pick_scored_revenue: Option<f64>,
    pub first_seen_date: Option<NaiveDate>,
    pub still_in_theaters: bool,
    pub excluded: bool,
}

fn share(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

/// Movies with revenue, in ranked order (`entries` must already be ranked).
pub fn build_released(entries: &[ScoredEntry], worst_picks: &[WorstPick]) -> Vec<ReleasedMovie> {
    let better: BTreeMap<&str, &WorstPick> =
        worst_picks.iter().map(|w| (w.title.as_str(), w)).collect();

    entries
        .iter()
        .filter(|e| e.is_released())
        .map(|e| {
            let worst = better.get(e.title.as_str());
            ReleasedMovie {
                rank: e.revenue_order_rank,
                title: e.title.clone(),
                drafted_by: e.drafted_by.clone(),
                revenue: e.revenue,
                scored_revenue: e.scored_revenue,
                round: e.round,
                overall_pick: e.overall_pick,
                multiplier: e.multiplier,
                domestic_revenue: e.domestic_revenue,
                domestic_pct: share(e.domestic_revenue, e.revenue),
                foreign_revenue: e.foreign_revenue,
                foreign_pct: share(e.foreign_revenue, e.revenue),
                better_pick_title: worst.map(|w| w.better_pick_title.clone()),
                better_pick_scored_revenue: worst.map(|w| w.better_pick_scored_revenue),
                first_seen_date: e.first_seen_date,
                still_in_theaters: e.still_in_theaters,
                excluded: e.excluded,
            }
        })
        .collect()
}
