use std::cmp::Ordering;

use super::engine::ScoredEntry;

/// Scored revenue descending, then title ascending.
pub fn revenue_order(a: &ScoredEntry, b: &ScoredEntry) -> Ordering {
    b.scored_revenue
        .total_cmp(&a.scored_revenue)
        .then_with(|| a.title.cmp(&b.title))
}

/// Assign `revenue_order_rank` 1..N to every non-excluded entry.
///
/// Returns the entries in rank order; excluded entries follow, unranked and
/// sorted by title.
pub fn rank_entries(entries: Vec<ScoredEntry>) -> Vec<ScoredEntry> {
    let (mut eligible, mut excluded): (Vec<_>, Vec<_>) =
        entries.into_iter().partition(|e| !e.excluded);

    eligible.sort_by(revenue_order);
    excluded.sort_by(|a, b| a.title.cmp(&b.title));

    eligible
        .into_iter()
        .zip(1u32..)
        .map(|(entry, rank)| ScoredEntry {
            revenue_order_rank: Some(rank),
            ..entry
        })
        .chain(excluded.into_iter().map(|entry| ScoredEntry {
            revenue_order_rank: None,
            ..entry
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, scored: f64, excluded: bool) -> ScoredEntry {
        ScoredEntry {
            title: title.to_string(),
            drafted_by: None,
            round: None,
            overall_pick: None,
            revenue: scored as u64,
            domestic_revenue: 0,
            foreign_revenue: 0,
            multiplier: 1.0,
            scored_revenue: scored,
            excluded,
            missing: false,
            first_seen_date: None,
            still_in_theaters: false,
            revenue_order_rank: None,
        }
    }

    fn ranks(entries: &[ScoredEntry]) -> Vec<(&str, Option<u32>)> {
        entries
            .iter()
            .map(|e| (e.title.as_str(), e.revenue_order_rank))
            .collect()
    }

    #[test]
    fn test_rank_by_scored_revenue() {
        let ranked = rank_entries(vec![
            entry("C", 10.0, false),
            entry("A", 200.0, false),
            entry("D", 150.0, false),
            entry("B", 180.0, false),
        ]);
        assert_eq!(
            ranks(&ranked),
            vec![("A", Some(1)), ("B", Some(2)), ("D", Some(3)), ("C", Some(4))]
        );
    }

    #[test]
    fn test_ties_broken_by_title() {
        let ranked = rank_entries(vec![
            entry("Zed", 100.0, false),
            entry("Alpha", 100.0, false),
            entry("Mid", 0.0, false),
            entry("Early", 0.0, false),
        ]);
        assert_eq!(
            ranks(&ranked),
            vec![
                ("Alpha", Some(1)),
                ("Zed", Some(2)),
                ("Early", Some(3)),
                ("Mid", Some(4))
            ]
        );
    }

    #[test]
    fn test_excluded_entries_unranked_and_last() {
        let ranked = rank_entries(vec![
            entry("Excluded", 0.0, true),
            entry("A", 5.0, false),
            entry("B", 1.0, false),
        ]);
        assert_eq!(
            ranks(&ranked),
            vec![("A", Some(1)), ("B", Some(2)), ("Excluded", None)]
        );
    }

    #[test]
    fn test_ranks_are_dense() {
        let input: Vec<ScoredEntry> = (0..25)
            .map(|i| entry(&format!("Movie {:02}", i), (i % 5) as f64, false))
            .collect();
        let ranked = rank_entries(input);
        let got: Vec<u32> = ranked.iter().filter_map(|e| e.revenue_order_rank).collect();
        let expected: Vec<u32> = (1..=25).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_rank_is_deterministic() {
        let input = vec![
            entry("B", 7.0, false),
            entry("A", 7.0, false),
            entry("C", 9.0, false),
        ];
        let mut reversed = input.clone();
        reversed.reverse();
        assert_eq!(rank_entries(input), rank_entries(reversed));
    }

    #[test]
    fn test_empty() {
        assert!(rank_entries(Vec::new()).is_empty());
    }
}
