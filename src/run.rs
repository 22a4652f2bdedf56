use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::config::{config_base_dir, load_config, validate_league};
use crate::draft::load_inputs;
use crate::scoring::{run_pipeline, season_complete, DraftError, LeagueReport};

/// Result of one league's run, tagged with the config it came from.
#[derive(Debug)]
pub struct LeagueOutcome {
    pub config_path: PathBuf,
    pub result: Result<LeagueReport>,
}

/// How a league run failed, for choosing an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Config file missing, unparsable, or failed validation
    Config,
    /// Input tables violate the schema
    Data,
    /// Anything else: missing or unreadable input files, task failures
    Io,
}

pub fn failure_kind(err: &anyhow::Error) -> FailureKind {
    match err.downcast_ref::<DraftError>() {
        Some(DraftError::InvalidConfig { .. }) => FailureKind::Config,
        Some(DraftError::SchemaViolation { .. }) => FailureKind::Data,
        None => FailureKind::Io,
    }
}

/// Load, validate and score a single league.
pub async fn score_league(config_path: &Path, current_year: i32) -> Result<LeagueReport> {
    let config = load_config(config_path).map_err(|e| DraftError::InvalidConfig {
        problems: vec![format!("{:#}", e)],
    })?;
    validate_league(&config, current_year)
        .map_err(|problems| DraftError::InvalidConfig { problems })
        .with_context(|| format!("Invalid league config {}", config_path.display()))?;

    let inputs = load_inputs(&config, &config_base_dir(config_path)).await?;
    info!(
        draft_id = %config.draft_id,
        revenue_rows = inputs.revenue.len(),
        picks = inputs.picks.len(),
        rules = inputs.rules.len(),
        manual_adds = inputs.manual_adds.len(),
        "Loaded league inputs"
    );

    let report = tokio::task::spawn_blocking(move || run_pipeline(&config, &inputs))
        .await
        .context("Scoring task failed")??;

    if season_complete(&report.released, report.year, current_year) {
        info!(
            draft_id = %report.draft_id,
            "Every released movie has left theaters; the league is done updating and can be removed from scheduled runs"
        );
    }

    Ok(report)
}

/// Score several leagues concurrently. One league failing never affects the
/// others. Outcomes are returned in the same order as `config_paths`.
pub async fn score_leagues(config_paths: &[PathBuf]) -> Vec<LeagueOutcome> {
    let current_year = Utc::now().year();

    let mut futures = FuturesUnordered::new();
    for (index, path) in config_paths.iter().enumerate() {
        let path = path.clone();
        futures.push(async move {
            let result = score_league(&path, current_year).await;
            (
                index,
                LeagueOutcome {
                    config_path: path,
                    result,
                },
            )
        });
    }

    let mut outcomes = Vec::with_capacity(config_paths.len());
    while let Some((index, outcome)) = futures.next().await {
        match &outcome.result {
            Ok(report) => info!(
                draft_id = %report.draft_id,
                drafters = report.scoreboard.len(),
                movies = report.entries.len(),
                "League scored"
            ),
            Err(e) => error!(
                config = %outcome.config_path.display(),
                "League failed: {:#}", e
            ),
        }
        outcomes.push((index, outcome));
    }

    outcomes.sort_by_key(|(index, _)| *index);
    outcomes.into_iter().map(|(_, outcome)| outcome).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn write_league(dir: &Path, draft_id: &str, picks: &str) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        fs::write(
            dir.join("revenue.json"),
            r#"[
                {"title": "Movie A", "total_revenue": 100, "release_year": 2025, "published_timestamp": "2025-06-01T00:00:00Z"},
                {"title": "Movie B", "total_revenue": "$250", "release_year": 2025, "published_timestamp": "2025-06-01T00:00:00Z"}
            ]"#,
        )
        .unwrap();
        fs::write(dir.join("picks.json"), picks).unwrap();
        let config_path = dir.join("league.yaml");
        fs::write(
            &config_path,
            format!(
                "year: 2025\nname: Test\ndraft_id: {}\ninputs:\n  revenue: revenue.json\n  picks: picks.json\n",
                draft_id
            ),
        )
        .unwrap();
        config_path
    }

    #[tokio::test]
    async fn test_score_leagues_keeps_order_and_isolates_failures() {
        let root = env::temp_dir().join("box_office_draft_test_run");
        let _ = fs::remove_dir_all(&root);

        let good = write_league(
            &root.join("good"),
            "good",
            r#"[{"drafter_name": "Alice", "movie_title": "Movie A", "round_number": 1, "overall_pick_number": 1}]"#,
        );
        let bad = write_league(
            &root.join("bad"),
            "bad",
            r#"[{"movie_title": "Movie A", "round_number": 1, "overall_pick_number": 1}]"#,
        );
        let missing = root.join("missing").join("league.yaml");
        let no_inputs = root.join("no_inputs").join("league.yaml");
        fs::create_dir_all(root.join("no_inputs")).unwrap();
        fs::write(
            &no_inputs,
            "year: 2025\nname: Test\ndraft_id: no_inputs\ninputs:\n  revenue: absent.json\n  picks: absent.json\n",
        )
        .unwrap();

        let outcomes =
            score_leagues(&[bad.clone(), good.clone(), missing.clone(), no_inputs.clone()]).await;
        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0].config_path, bad);
        assert_eq!(outcomes[1].config_path, good);

        let bad_err = outcomes[0].result.as_ref().unwrap_err();
        assert_eq!(failure_kind(bad_err), FailureKind::Data);

        let report = outcomes[1].result.as_ref().unwrap();
        assert_eq!(report.scoreboard.len(), 1);
        assert_eq!(report.scoreboard[0].total_scored_revenue, 100.0);

        let missing_err = outcomes[2].result.as_ref().unwrap_err();
        assert_eq!(failure_kind(missing_err), FailureKind::Config);

        let io_err = outcomes[3].result.as_ref().unwrap_err();
        assert_eq!(failure_kind(io_err), FailureKind::Io);

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn test_invalid_config_is_config_failure() {
        let root = env::temp_dir().join("box_office_draft_test_run_invalid");
        let _ = fs::remove_dir_all(&root);
        let path = write_league(&root, "has space", "[]");

        let err = score_league(&path, 2025).await.unwrap_err();
        assert_eq!(failure_kind(&err), FailureKind::Config);

        let _ = fs::remove_dir_all(&root);
    }
}
