use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::diagnostics::{missing_movies, stale_revenue};
use super::engine::{score_movies, ScoredEntry};
use super::error::{DraftError, InputIssue};
use super::multiplier::RuleSet;
use super::normalize::normalize_revenue;
use super::picks::{find_best_picks, find_worst_picks, BestPick, WorstPick};
use super::rank::rank_entries;
use super::released::{build_released, ReleasedMovie};
use super::scoreboard::{build_scoreboard, ScoreboardRow};
use crate::config::LeagueConfig;
use crate::draft::{validate_manual_adds, validate_observations, validate_picks, DraftInputs};

/// Everything one league run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueReport {
    pub draft_id: String,
    pub name: String,
    pub year: i32,
    pub as_of: Option<DateTime<Utc>>,
    /// Every scored movie, in rank order with excluded movies last
    pub entries: Vec<ScoredEntry>,
    pub scoreboard: Vec<ScoreboardRow>,
    pub best_picks: Vec<BestPick>,
    pub worst_picks: Vec<WorstPick>,
    pub released: Vec<ReleasedMovie>,
    pub issues: Vec<InputIssue>,
}

/// Run every stage for one league: normalize, resolve rules, score, rank,
/// then best/worst pick analysis and the scoreboard.
///
/// Pure over its inputs. Any schema violation fails the whole run so that no
/// partial scoreboard is ever produced.
pub fn run_pipeline(config: &LeagueConfig, inputs: &DraftInputs) -> Result<LeagueReport, DraftError> {
    let theater_window = config
        .analysis
        .theater_window()
        .and_then(|d| Ok(chrono::Duration::from_std(d)?))
        .map_err(|e| DraftError::InvalidConfig {
            problems: vec![format!("analysis.theater_window: {:#}", e)],
        })?;
    let policy = config.analysis.policy();

    let mut issues = Vec::new();
    let mut violations = validate_observations(&inputs.revenue);
    violations.extend(validate_manual_adds(&inputs.manual_adds));

    let picks = match validate_picks(&inputs.picks) {
        Ok(picks) => picks,
        Err(errors) => {
            violations.extend(errors);
            Vec::new()
        }
    };
    let rules = match RuleSet::from_rows(&inputs.rules, &mut issues) {
        Ok(rules) => rules,
        Err(errors) => {
            violations.extend(errors);
            RuleSet::default()
        }
    };

    if !violations.is_empty() {
        return Err(DraftError::SchemaViolation {
            draft_id: config.draft_id.clone(),
            violations,
        });
    }

    let revenue = normalize_revenue(
        &inputs.revenue,
        &inputs.manual_adds,
        config.year,
        theater_window,
        &mut issues,
    );
    let entries = rank_entries(score_movies(&revenue, &picks, &rules, &mut issues));
    let best_picks = find_best_picks(&entries);
    let worst_picks = find_worst_picks(&entries, policy);
    let scoreboard = build_scoreboard(&entries, &worst_picks);
    let released = build_released(&entries, &worst_picks);
    issues.extend(stale_revenue(&revenue, &picks));

    debug!(
        draft_id = %config.draft_id,
        movies = entries.len(),
        picks = picks.len(),
        best = best_picks.len(),
        worst = worst_picks.len(),
        ?policy,
        "scored league"
    );

    let missing = missing_movies(&entries);
    if missing.is_empty() {
        info!(draft_id = %config.draft_id, "All drafted movies have revenue records");
    } else {
        info!(
            draft_id = %config.draft_id,
            "Drafted movies missing from the revenue snapshot (add them to manual adds): {}",
            missing.join(", ")
        );
    }
    for issue in &issues {
        if !matches!(issue, InputIssue::MissingMovie { .. }) {
            warn!(draft_id = %config.draft_id, "{}", issue);
        }
    }

    Ok(LeagueReport {
        draft_id: config.draft_id.clone(),
        name: config.name.clone(),
        year: config.year,
        as_of: revenue.as_of,
        entries,
        scoreboard,
        best_picks,
        worst_picks,
        released,
        issues,
    })
}
