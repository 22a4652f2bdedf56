use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::engine::ScoredEntry;
use super::picks::WorstPick;

/// Per-drafter standings. The first five fields are the published contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreboardRow {
    pub drafter_name: String,
    pub total_scored_revenue: f64,
    pub num_released: u32,
    pub correctly_drafted_pick_count: u32,
    pub correct_pick_pct: f64,
    /// Raw revenue before multipliers
    pub unadjusted_revenue: u64,
    /// Non-excluded picks; the denominator of `correct_pick_pct`
    pub total_pick_count: u32,
}

#[derive(Default)]
struct Tally {
    total_scored_revenue: u64,
    num_released: u32,
    correct: u32,
    counted_picks: u32,
    unadjusted_revenue: u64,
}

/// Roll scored entries up to one row per drafter, highest total first
/// (drafter name breaks ties).
///
/// A pick is "correct" when the worst-pick analysis found nothing better.
/// Excluded picks add nothing and are left out of the accuracy ratio.
pub fn build_scoreboard(entries: &[ScoredEntry], worst_picks: &[WorstPick]) -> Vec<ScoreboardRow> {
    let beaten: BTreeSet<&str> = worst_picks.iter().map(|w| w.title.as_str()).collect();
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();

    for entry in entries {
        let Some(drafter) = entry.drafted_by.as_deref() else {
            continue;
        };
        let tally = tallies.entry(drafter).or_default();

        if entry.is_released() {
            tally.num_released += 1;
        }
        if entry.excluded {
            continue;
        }

        // Scored revenue is whole dollars, so integer sums are exact
        tally.total_scored_revenue = tally
            .total_scored_revenue
            .saturating_add(entry.scored_revenue as u64);
        tally.unadjusted_revenue = tally.unadjusted_revenue.saturating_add(entry.revenue);
        tally.counted_picks += 1;
        if !beaten.contains(entry.title.as_str()) {
            tally.correct += 1;
        }
    }

    let mut rows: Vec<ScoreboardRow> = tallies
        .into_iter()
        .map(|(drafter, tally)| ScoreboardRow {
            drafter_name: drafter.to_string(),
            total_scored_revenue: tally.total_scored_revenue as f64,
            num_released: tally.num_released,
            correctly_drafted_pick_count: tally.correct,
            correct_pick_pct: if tally.counted_picks == 0 {
                0.0
            } else {
                f64::from(tally.correct) / f64::from(tally.counted_picks)
            },
            unadjusted_revenue: tally.unadjusted_revenue,
            total_pick_count: tally.counted_picks,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_scored_revenue
            .total_cmp(&a.total_scored_revenue)
            .then_with(|| a.drafter_name.cmp(&b.drafter_name))
    });
    rows
}
