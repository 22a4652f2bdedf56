use serde::{Deserialize, Serialize};

use super::engine::ScoredEntry;
use super::rank::revenue_order;

/// Which movies count as "still available" when judging a pick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlternativePolicy {
    /// Only movies nobody drafted
    UndraftedOnly,
    /// Undrafted movies, or movies drafted at a later overall pick
    #[default]
    UndraftedOrLater,
    /// Undrafted movies, or movies a different drafter took later
    LaterByOtherDrafter,
}

impl AlternativePolicy {
    /// Could `candidate` have been taken instead of `pick`?
    pub fn is_available(&self, candidate: &ScoredEntry, pick: &ScoredEntry) -> bool {
        let Some(candidate_pick) = candidate.overall_pick else {
            return true;
        };
        let later = pick.overall_pick.is_some_and(|p| candidate_pick > p);
        match self {
            AlternativePolicy::UndraftedOnly => false,
            AlternativePolicy::UndraftedOrLater => later,
            AlternativePolicy::LaterByOtherDrafter => later && candidate.drafted_by != pick.drafted_by,
        }
    }
}

/// A pick taken later than its revenue deserved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestPick {
    pub rank: u32,
    pub title: String,
    pub drafted_by: String,
    pub overall_pick: u32,
    pub positions_gained: u32,
    pub actual_revenue: f64,
    pub revenue_order_rank: u32,
}

/// A pick that a higher-scoring available movie beat.
///
/// The first five fields are the published contract; the rest follow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorstPick {
    pub title: String,
    pub drafted_by: String,
    pub missed_revenue: f64,
    pub number_of_better_picks: u32,
    pub better_pick_title: String,
    /// 1-based position in the worst-pick table
    pub rank: u32,
    pub overall_pick: u32,
    pub revenue_order_rank: Option<u32>,
    pub scored_revenue: f64,
    pub better_pick_scored_revenue: f64,
}

/// Drafted, non-excluded movies with revenue whose overall pick came after
/// their revenue rank. Ordered by positions gained, earlier picks first on ties.
pub fn find_best_picks(entries: &[ScoredEntry]) -> Vec<BestPick> {
    let mut rows: Vec<(i64, &ScoredEntry, u32, u32)> = entries
        .iter()
        .filter(|e| e.counts_for_drafter() && e.scored_revenue > 0.0)
        .filter_map(|e| {
            let pick = e.overall_pick?;
            let rank = e.revenue_order_rank?;
            let gap = i64::from(pick) - i64::from(rank);
            (gap > 0).then_some((gap, e, pick, rank))
        })
        .collect();

    rows.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.2.cmp(&b.2)));

    rows.into_iter()
        .zip(1u32..)
        .map(|((gap, entry, pick, rank), position)| BestPick {
            rank: position,
            title: entry.title.clone(),
            drafted_by: entry.drafted_by.clone().unwrap_or_default(),
            overall_pick: pick,
            positions_gained: gap as u32,
            actual_revenue: entry.scored_revenue,
            revenue_order_rank: rank,
        })
        .collect()
}

/// For each drafted, non-excluded movie, find the best movie still available
/// under `policy` that out-scored it. Picks nothing beat are left out.
/// Ordered by missed revenue, earlier picks first on ties.
pub fn find_worst_picks(entries: &[ScoredEntry], policy: AlternativePolicy) -> Vec<WorstPick> {
    let mut rows: Vec<WorstPick> = entries
        .iter()
        .filter(|e| e.counts_for_drafter())
        .filter_map(|pick| {
            let overall_pick = pick.overall_pick?;
            let better: Vec<&ScoredEntry> = entries
                .iter()
                .filter(|c| {
                    !c.excluded
                        && c.title != pick.title
                        && c.scored_revenue > pick.scored_revenue
                        && policy.is_available(c, pick)
                })
                .collect();
            let alternative = better.iter().copied().min_by(|a, b| revenue_order(a, b))?;

            Some(WorstPick {
                title: pick.title.clone(),
                drafted_by: pick.drafted_by.clone().unwrap_or_default(),
                missed_revenue: (alternative.scored_revenue - pick.scored_revenue).max(0.0),
                number_of_better_picks: better.len() as u32,
                better_pick_title: alternative.title.clone(),
                rank: 0,
                overall_pick,
                revenue_order_rank: pick.revenue_order_rank,
                scored_revenue: pick.scored_revenue,
                better_pick_scored_revenue: alternative.scored_revenue,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.missed_revenue
            .total_cmp(&a.missed_revenue)
            .then_with(|| a.overall_pick.cmp(&b.overall_pick))
    });
    for (row, rank) in rows.iter_mut().zip(1u32..) {
        row.rank = rank;
    }
    rows
}
