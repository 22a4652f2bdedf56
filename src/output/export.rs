use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::scoring::{BestPick, LeagueReport, ReleasedMovie, ScoreboardRow, WorstPick};

pub const SCHEMA_VERSION: u32 = 1;

/// Published shape of one league's results.
#[derive(Debug, Serialize)]
pub struct ReportExport<'a> {
    pub schema_version: u32,
    pub draft_id: &'a str,
    pub name: &'a str,
    pub year: i32,
    pub as_of: Option<DateTime<Utc>>,
    pub scoreboard: &'a [ScoreboardRow],
    pub best_picks: &'a [BestPick],
    pub worst_picks: &'a [WorstPick],
    pub released: &'a [ReleasedMovie],
}

impl<'a> From<&'a LeagueReport> for ReportExport<'a> {
    fn from(report: &'a LeagueReport) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            draft_id: &report.draft_id,
            name: &report.name,
            year: report.year,
            as_of: report.as_of,
            scoreboard: &report.scoreboard,
            best_picks: &report.best_picks,
            worst_picks: &report.worst_picks,
            released: &report.released,
        }
    }
}

pub fn report_to_json(report: &LeagueReport) -> Result<String> {
    serde_json::to_string_pretty(&ReportExport::from(report))
        .with_context(|| format!("Failed to serialize report for {}", report.draft_id))
}

/// Write `<draft_id>.json` into `dir` atomically, creating `dir` if needed.
/// Readers never see a half-written file.
pub fn write_report_json(dir: &Path, report: &LeagueReport) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let path = dir.join(format!("{}.json", report.draft_id));
    let mut file = AtomicWriteFile::open(&path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, &ReportExport::from(report))
        .context("Failed to serialize report")?;

    file.commit()
        .with_context(|| format!("Failed to save report to {}", path.display()))?;

    Ok(path)
}
