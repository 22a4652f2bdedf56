use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::scoring::{BestPick, InputIssue, LeagueReport, ReleasedMovie, ScoreboardRow, WorstPick};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format revenue in compact dollar notation ($1.5k, $2.3M, $1.1B, $847)
pub fn format_revenue(amount: f64) -> String {
    let formatted = if amount >= 1_000_000_000.0 {
        format!("{:.1}B", amount / 1_000_000_000.0)
    } else if amount >= 1_000_000.0 {
        format!("{:.1}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("{:.1}k", amount / 1_000.0)
    } else {
        format!("{:.0}", amount)
    };

    // Trim trailing .0 (e.g., "1.0M" -> "1M")
    let trimmed = formatted
        .replace(".0B", "B")
        .replace(".0M", "M")
        .replace(".0k", "k");

    format!("${}", trimmed)
}

/// Format a 0..=1 ratio as a whole percentage
pub fn format_pct(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

/// Format a multiplier as "x2" or "x1.5"
pub fn format_multiplier(multiplier: f64) -> String {
    let text = format!("{:.2}", multiplier);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("x{}", text)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Title width left over after the fixed columns, or unlimited for pipes
fn title_budget(term_width: Option<usize>, fixed_width: usize) -> Option<usize> {
    term_width.map(|width| {
        if width > fixed_width + 10 {
            width - fixed_width
        } else {
            20
        }
    })
}

fn fit_title(title: &str, budget: Option<usize>) -> String {
    match budget {
        Some(width) => truncate_title(title, width),
        None => title.to_string(),
    }
}

fn section_header(title: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

/// Standings, one line per drafter
/// Index column: 3 chars (fits "99."), right-aligned
pub fn format_scoreboard(rows: &[ScoreboardRow], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No drafters found.".to_string();
    }

    let name_width = rows
        .iter()
        .map(|r| r.drafter_name.chars().count())
        .max()
        .unwrap_or(0);

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let index_str = format!("{:>2}.", idx + 1);
            let total = format!("{:>8}", format_revenue(row.total_scored_revenue));
            let accuracy = format!(
                "{}/{} correct ({})",
                row.correctly_drafted_pick_count,
                row.total_pick_count,
                format_pct(row.correct_pick_pct)
            );
            let name = format!("{:<width$}", row.drafter_name, width = name_width);

            if use_colors {
                format!(
                    "{} {}  {}  {}",
                    index_str.dimmed(),
                    name.yellow(),
                    total.bold(),
                    accuracy.dimmed()
                )
            } else {
                format!("{} {}  {}  {}", index_str, name, total, accuracy)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_best_picks(picks: &[BestPick], use_colors: bool) -> String {
    if picks.is_empty() {
        return "No picks beat their draft position.".to_string();
    }

    picks
        .iter()
        .map(|p| {
            let gained = format!("+{}", p.positions_gained);
            let detail = format!(
                "pick #{} finished #{} ({})",
                p.overall_pick,
                p.revenue_order_rank,
                format_revenue(p.actual_revenue)
            );
            if use_colors {
                format!(
                    "{:>2}. {:>4}  {}  {}  {}",
                    p.rank,
                    gained.green(),
                    p.title.bold(),
                    p.drafted_by.yellow(),
                    detail.dimmed()
                )
            } else {
                format!(
                    "{:>2}. {:>4}  {}  {}  {}",
                    p.rank, gained, p.title, p.drafted_by, detail
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_worst_picks(picks: &[WorstPick], use_colors: bool) -> String {
    if picks.is_empty() {
        return "No picks had a better alternative.".to_string();
    }

    picks
        .iter()
        .map(|p| {
            let missed = format!("-{}", format_revenue(p.missed_revenue));
            let detail = format!(
                "pick #{}, {} better option(s), best was {} ({})",
                p.overall_pick,
                p.number_of_better_picks,
                p.better_pick_title,
                format_revenue(p.better_pick_scored_revenue)
            );
            if use_colors {
                format!(
                    "{:>2}. {:>8}  {}  {}  {}",
                    p.rank,
                    missed.red(),
                    p.title.bold(),
                    p.drafted_by.yellow(),
                    detail.dimmed()
                )
            } else {
                format!(
                    "{:>2}. {:>8}  {}  {}  {}",
                    p.rank,
                    missed,
                    p.title,
                    p.drafted_by,
                    detail
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Released movies in rank order. Titles are truncated to the terminal width;
/// piped output is never truncated.
pub fn format_released(movies: &[ReleasedMovie], use_colors: bool) -> String {
    format_released_with_width(movies, use_colors, get_terminal_width())
}

fn format_released_with_width(
    movies: &[ReleasedMovie],
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    if movies.is_empty() {
        return "No released movies yet.".to_string();
    }

    // Rank (4) + scored (8) + multiplier (6) + drafter (~16) + separators
    let budget = title_budget(term_width, 4 + 8 + 6 + 16 + 10);

    movies
        .iter()
        .map(|m| {
            let rank = match m.rank {
                Some(rank) => format!("{:>3}.", rank),
                None => "  -.".to_string(),
            };
            let scored = format!("{:>8}", format_revenue(m.scored_revenue));
            let multiplier = format!("{:<5}", format_multiplier(m.multiplier));
            let drafter = m.drafted_by.as_deref().unwrap_or("undrafted");
            let mut title = fit_title(&m.title, budget);
            if m.still_in_theaters {
                title.push('*');
            }

            if use_colors {
                let drafter = if m.drafted_by.is_some() {
                    format!("{}", drafter.yellow())
                } else {
                    format!("{}", drafter.dimmed())
                };
                let title = if m.excluded {
                    format!("{}", title.strikethrough())
                } else {
                    title
                };
                format!(
                    "{} {}  {}  {}  {}",
                    rank.dimmed(),
                    scored.bold(),
                    multiplier.cyan(),
                    title,
                    drafter
                )
            } else {
                let excluded = if m.excluded { " (excluded)" } else { "" };
                format!(
                    "{} {}  {}  {}{}  {}",
                    rank, scored, multiplier, title, excluded, drafter
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_issues(issues: &[InputIssue], use_colors: bool) -> String {
    issues
        .iter()
        .map(|issue| {
            if use_colors {
                format!("  {} {}", "!".yellow(), issue)
            } else {
                format!("  ! {}", issue)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full human-readable report for one league.
/// Verbose mode adds the released-movie table and every input issue.
pub fn format_report(report: &LeagueReport, use_colors: bool, verbose: bool) -> String {
    let as_of = report
        .as_of
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let heading = format!("{} ({}) as of {}", report.name, report.year, as_of);

    let mut sections = vec![
        if use_colors {
            format!("{}", heading.bold())
        } else {
            heading
        },
        String::new(),
        section_header("Scoreboard", use_colors),
        format_scoreboard(&report.scoreboard, use_colors),
        String::new(),
        section_header("Best picks", use_colors),
        format_best_picks(&report.best_picks, use_colors),
        String::new(),
        section_header("Worst picks", use_colors),
        format_worst_picks(&report.worst_picks, use_colors),
    ];

    if verbose {
        sections.push(String::new());
        sections.push(section_header("Released movies (* still in theaters)", use_colors));
        sections.push(format_released(&report.released, use_colors));
    }

    if !report.issues.is_empty() {
        sections.push(String::new());
        if verbose {
            sections.push(section_header("Input issues", use_colors));
            sections.push(format_issues(&report.issues, use_colors));
        } else {
            sections.push(format!(
                "{} input issue(s); rerun with -v for details",
                report.issues.len()
            ));
        }
    }

    sections.join("\n")
}

/// Scoreboard as tab-separated values for scripting
/// Columns: draft_id, drafter, total, num_released, correct, correct_pct
/// (no headers, no colors)
pub fn format_tsv(report: &LeagueReport) -> String {
    report
        .scoreboard
        .iter()
        .map(|row| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{:.4}",
                report.draft_id,
                row.drafter_name,
                row.total_scored_revenue.round() as i64,
                row.num_released,
                row.correctly_drafted_pick_count,
                row.correct_pick_pct
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
