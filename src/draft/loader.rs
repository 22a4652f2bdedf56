use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

use super::types::DraftInputs;
use crate::config::{resolve_input, LeagueConfig};

enum RowFormat {
    Json,
    Yaml,
}

fn row_format(path: &Path) -> Result<RowFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => Ok(RowFormat::Json),
        Some("yaml") | Some("yml") => Ok(RowFormat::Yaml),
        _ => bail!(
            "Unsupported input file {}: expected .json, .yaml or .yml",
            path.display()
        ),
    }
}

/// Parse a list of rows. The format is picked from the file extension.
/// An empty file is an empty table.
pub fn parse_rows<T: DeserializeOwned>(content: &str, path: &Path) -> Result<Vec<T>> {
    let format = row_format(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let rows = match format {
        RowFormat::Json => serde_json::from_str(content)
            .with_context(|| format!("Failed to parse rows: invalid JSON in {}", path.display()))?,
        RowFormat::Yaml => serde_saphyr::from_str(content)
            .with_context(|| format!("Failed to parse rows: invalid YAML in {}", path.display()))?,
    };
    Ok(rows)
}

/// Read and parse a table of rows from disk.
pub async fn load_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read input file at {}", path.display()))?;
    let rows = parse_rows(&content, path)?;
    debug!(path = %path.display(), rows = rows.len(), "loaded input table");
    Ok(rows)
}

async fn load_optional<T: DeserializeOwned>(base_dir: &Path, path: Option<&str>) -> Result<Vec<T>> {
    match path {
        Some(p) => load_rows(&resolve_input(base_dir, p)).await,
        None => Ok(Vec::new()),
    }
}

/// Load every input table a league names. Relative paths are resolved
/// against `base_dir` (the config file's directory).
pub async fn load_inputs(config: &LeagueConfig, base_dir: &Path) -> Result<DraftInputs> {
    let inputs = &config.inputs;
    let revenue_path = resolve_input(base_dir, &inputs.revenue);
    let picks_path = resolve_input(base_dir, &inputs.picks);

    let (revenue, picks, rules, manual_adds) = tokio::try_join!(
        load_rows(&revenue_path),
        load_rows(&picks_path),
        load_optional(base_dir, inputs.rules.as_deref()),
        load_optional(base_dir, inputs.manual_adds.as_deref()),
    )?;

    Ok(DraftInputs {
        revenue,
        manual_adds,
        picks,
        rules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputPaths;
    use crate::draft::types::{RawPick, RevenueObservation, RuleRow};
    use std::env;
    use std::path::PathBuf;

    #[test]
    fn test_parse_json_rows() {
        let rows: Vec<RuleRow> = parse_rows(
            r#"[{"rule_type": "exclusion", "target": "Movie A"}]"#,
            Path::new("rules.json"),
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].target.as_deref(), Some("Movie A"));
    }

    #[test]
    fn test_parse_yaml_rows() {
        let yaml = r#"
- rule_type: round_default
  target: "1"
  value: 2.0
- rule_type: movie_override
  target: "Movie D"
  value: "x3"
"#;
        let rows: Vec<RuleRow> = parse_rows(yaml, Path::new("rules.YML")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].rule_type.as_deref(), Some("movie_override"));
    }

    #[test]
    fn test_parse_empty_file() {
        let rows: Vec<RawPick> = parse_rows("  \n", Path::new("picks.yaml")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_unknown_extension() {
        let result: Result<Vec<RawPick>> = parse_rows("[]", Path::new("picks.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_invalid_json_names_file() {
        let result: Result<Vec<RevenueObservation>> = parse_rows("{", Path::new("rev.json"));
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("rev.json"));
    }

    #[tokio::test]
    async fn test_load_inputs_from_disk() {
        let dir = env::temp_dir().join("box_office_draft_test_load_inputs");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("revenue.json"),
            r#"[{"title": "Movie A", "total_revenue": 100}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.join("picks.yaml"),
            "- drafter_name: Alice\n  movie_title: Movie A\n  round_number: 1\n  overall_pick_number: 1\n",
        )
        .unwrap();

        let config = LeagueConfig {
            year: 2025,
            name: "Test League".to_string(),
            draft_id: "test".to_string(),
            inputs: InputPaths {
                revenue: "revenue.json".to_string(),
                picks: "picks.yaml".to_string(),
                rules: None,
                manual_adds: None,
            },
            analysis: Default::default(),
        };

        let inputs = load_inputs(&config, &dir).await.unwrap();
        assert_eq!(inputs.revenue.len(), 1);
        assert_eq!(inputs.picks.len(), 1);
        assert!(inputs.rules.is_empty());
        assert!(inputs.manual_adds.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_load_inputs_missing_file() {
        let dir = PathBuf::from("/nonexistent/box-office-draft");
        let config = LeagueConfig {
            year: 2025,
            name: "Test League".to_string(),
            draft_id: "test".to_string(),
            inputs: InputPaths {
                revenue: "revenue.json".to_string(),
                picks: "picks.yaml".to_string(),
                rules: None,
                manual_adds: None,
            },
            analysis: Default::default(),
        };
        assert!(load_inputs(&config, &dir).await.is_err());
    }
}
