use std::collections::{BTreeMap, HashMap};

use super::types::{DraftPick, ManualAdd, RawPick, RawValue, RevenueObservation};

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn describe(value: Option<&RawValue>) -> String {
    value
        .map(|v| format!("'{}'", v))
        .unwrap_or_else(|| "nothing".to_string())
}

/// Validate raw draft picks into `DraftPick`s sorted by overall pick.
/// Returns all validation errors at once (not just the first).
pub fn validate_picks(rows: &[RawPick]) -> Result<Vec<DraftPick>, Vec<String>> {
    let mut errors = Vec::new();
    let mut picks = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let drafter = non_empty(row.drafter_name.as_deref());
        let title = non_empty(row.movie_title.as_deref());
        let round = row.round_number.as_ref().and_then(RawValue::as_positive_int);
        let overall = row
            .overall_pick_number
            .as_ref()
            .and_then(RawValue::as_positive_int);

        if drafter.is_none() {
            errors.push(format!("picks[{}].drafter_name: required", i));
        }
        if title.is_none() {
            errors.push(format!("picks[{}].movie_title: required", i));
        }
        if round.is_none() {
            errors.push(format!(
                "picks[{}].round_number: expected a positive integer, got {}",
                i,
                describe(row.round_number.as_ref())
            ));
        }
        if overall.is_none() {
            errors.push(format!(
                "picks[{}].overall_pick_number: expected a positive integer, got {}",
                i,
                describe(row.overall_pick_number.as_ref())
            ));
        }

        if let (Some(drafter), Some(title), Some(round), Some(overall)) =
            (drafter, title, round, overall)
        {
            picks.push(DraftPick {
                drafter_name: drafter.to_string(),
                movie_title: title.to_string(),
                round_number: round,
                overall_pick_number: overall,
            });
        }
    }

    let mut by_overall: BTreeMap<u32, &DraftPick> = BTreeMap::new();
    let mut by_title: HashMap<&str, u32> = HashMap::new();
    for pick in &picks {
        if by_overall.insert(pick.overall_pick_number, pick).is_some() {
            errors.push(format!(
                "overall pick {} is used more than once",
                pick.overall_pick_number
            ));
        }
        if let Some(first) = by_title.insert(&pick.movie_title, pick.overall_pick_number) {
            errors.push(format!(
                "'{}' is drafted twice (picks {} and {})",
                pick.movie_title, first, pick.overall_pick_number
            ));
        }
    }

    // Rounds must never go backwards as the overall pick number grows
    let mut previous: Option<&DraftPick> = None;
    for pick in by_overall.values() {
        if let Some(prev) = previous {
            if pick.round_number < prev.round_number {
                errors.push(format!(
                    "overall pick {} is in round {} but follows pick {} in round {}",
                    pick.overall_pick_number,
                    pick.round_number,
                    prev.overall_pick_number,
                    prev.round_number
                ));
            }
        }
        previous = Some(pick);
    }

    if errors.is_empty() {
        picks.sort_by_key(|p| p.overall_pick_number);
        Ok(picks)
    } else {
        Err(errors)
    }
}

/// Every revenue row must name a title.
pub fn validate_observations(rows: &[RevenueObservation]) -> Vec<String> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.title.trim().is_empty())
        .map(|(i, _)| format!("revenue[{}].title: required", i))
        .collect()
}

/// Every manual add must name a title.
pub fn validate_manual_adds(rows: &[ManualAdd]) -> Vec<String> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.title.trim().is_empty())
        .map(|(i, _)| format!("manual_adds[{}].title: required", i))
        .collect()
}
