mod schema;
mod validation;

pub use schema::{AnalysisConfig, InputPaths, LeagueConfig, DEFAULT_THEATER_WINDOW};
pub use validation::validate_league;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/box-office-draft/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("box-office-draft"))
}

/// Get the default league config path (~/.config/box-office-draft/league.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("league.yaml"))
}

/// Load a league configuration from a YAML file
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: &Path) -> Result<LeagueConfig> {
    if !path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Create ~/.config/box-office-draft/league.yaml or pass --config",
            path.display()
        );
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: LeagueConfig = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    Ok(config)
}

/// Directory that relative input paths in a config file are resolved against.
pub fn config_base_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Resolve an input path from a config file against its base directory.
pub fn resolve_input(base_dir: &Path, input: &str) -> PathBuf {
    let path = Path::new(input);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_resolve_relative_input() {
        let resolved = resolve_input(Path::new("/leagues/friends"), "picks.yaml");
        assert_eq!(resolved, PathBuf::from("/leagues/friends/picks.yaml"));
    }

    #[test]
    fn test_resolve_absolute_input() {
        let resolved = resolve_input(Path::new("/leagues/friends"), "/data/revenue.json");
        assert_eq!(resolved, PathBuf::from("/data/revenue.json"));
    }

    #[test]
    fn test_base_dir_of_bare_file_name() {
        assert_eq!(config_base_dir(Path::new("league.yaml")), PathBuf::from(""));
    }

    #[test]
    fn test_load_missing_config() {
        let path = env::temp_dir().join("box_office_draft_missing_league.yaml");
        let _ = fs::remove_file(&path);
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_config_from_disk() {
        let path = env::temp_dir().join("box_office_draft_test_league.yaml");
        fs::write(
            &path,
            "year: 2025\nname: League\ndraft_id: league\ninputs:\n  revenue: r.json\n  picks: p.json\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.name, "League");
        assert_eq!(config.inputs.picks, "p.json");

        let _ = fs::remove_file(&path);
    }
}
