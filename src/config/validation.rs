use super::schema::LeagueConfig;

const EARLIEST_YEAR: i32 = 1900;

/// Validate a league configuration before any input is loaded.
/// Returns all validation errors at once (not just the first).
pub fn validate_league(config: &LeagueConfig, current_year: i32) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.name.trim().is_empty() {
        errors.push("name: must not be empty".to_string());
    }

    if config.draft_id.trim().is_empty() {
        errors.push("draft_id: must not be empty".to_string());
    } else if config
        .draft_id
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
    {
        errors.push(format!(
            "draft_id: '{}' may only contain letters, digits, '_' and '-'",
            config.draft_id
        ));
    }

    if config.year < EARLIEST_YEAR || config.year > current_year + 1 {
        errors.push(format!(
            "year: must be between {} and {}, got {}",
            EARLIEST_YEAR,
            current_year + 1,
            config.year
        ));
    }

    if config.inputs.revenue.trim().is_empty() {
        errors.push("inputs.revenue: must not be empty".to_string());
    }
    if config.inputs.picks.trim().is_empty() {
        errors.push("inputs.picks: must not be empty".to_string());
    }
    for (field, value) in [
        ("inputs.rules", &config.inputs.rules),
        ("inputs.manual_adds", &config.inputs.manual_adds),
    ] {
        if matches!(value, Some(v) if v.trim().is_empty()) {
            errors.push(format!("{}: must not be empty when set", field));
        }
    }

    if let Err(e) = config.analysis.theater_window() {
        errors.push(format!("analysis.theater_window: {:#}", e));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
