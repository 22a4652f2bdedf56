use super::engine::ScoredEntry;
use super::error::InputIssue;
use super::normalize::NormalizedRevenue;
use super::released::ReleasedMovie;
use crate::draft::DraftPick;

/// Drafted titles with no revenue record, sorted.
pub fn missing_movies(entries: &[ScoredEntry]) -> Vec<String> {
    let mut titles: Vec<String> = entries
        .iter()
        .filter(|e| e.missing)
        .map(|e| e.title.clone())
        .collect();
    titles.sort();
    titles
}

/// Drafted titles whose revenue did not come from the latest pull and is no
/// higher than the smallest revenue in that pull. The source likely dropped
/// them, so the number may be stale.
pub fn stale_revenue(revenue: &NormalizedRevenue, picks: &[DraftPick]) -> Vec<InputIssue> {
    let (Some(as_of), Some(minimum)) = (revenue.as_of, revenue.latest_minimum) else {
        return Vec::new();
    };

    let mut issues: Vec<InputIssue> = picks
        .iter()
        .filter_map(|pick| revenue.get(&pick.movie_title))
        .filter(|r| !r.manual)
        .filter(|r| r.last_updated_timestamp.map_or(true, |t| t < as_of))
        .filter(|r| r.total_revenue <= minimum)
        .map(|r| InputIssue::StaleRevenue {
            title: r.title.clone(),
            revenue: r.total_revenue,
            latest_minimum: minimum,
        })
        .collect();
    issues.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
    issues
}

/// True once every released movie has left theaters and the season's year
/// is over. The league no longer needs scheduled runs.
pub fn season_complete(released: &[ReleasedMovie], year: i32, current_year: i32) -> bool {
    !released.is_empty() && year < current_year && released.iter().all(|m| !m.still_in_theaters)
}
