pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{load_inputs, load_rows, parse_rows};
pub use types::{
    DraftInputs, DraftPick, ManualAdd, RawPick, RawValue, RevenueObservation, RevenueRecord,
    RuleRow,
};
pub use validation::{validate_manual_adds, validate_observations, validate_picks};
