pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod multiplier;
pub mod normalize;
pub mod picks;
pub mod pipeline;
pub mod rank;
pub mod released;
pub mod rules;
pub mod scoreboard;

pub use diagnostics::{missing_movies, season_complete, stale_revenue};
pub use engine::{score_movies, ScoredEntry};
pub use error::{DraftError, InputIssue};
pub use multiplier::{RuleSet, DEFAULT_MULTIPLIER};
pub use normalize::{normalize_revenue, NormalizedRevenue};
pub use picks::{find_best_picks, find_worst_picks, AlternativePolicy, BestPick, WorstPick};
pub use pipeline::{run_pipeline, LeagueReport};
pub use rank::{rank_entries, revenue_order};
pub use released::{build_released, ReleasedMovie};
pub use rules::{parse_multiplier, RangeOp};
pub use scoreboard::{build_scoreboard, ScoreboardRow};
