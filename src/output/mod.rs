pub mod export;
pub mod formatter;

pub use export::{report_to_json, write_report_json, ReportExport, SCHEMA_VERSION};
pub use formatter::{
    format_best_picks, format_issues, format_multiplier, format_pct, format_released,
    format_report, format_revenue, format_scoreboard, format_tsv, format_worst_picks,
    should_use_colors,
};
