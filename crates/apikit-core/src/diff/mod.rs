//! Change plans and diffs

mod display;
mod text;
mod types;

pub use display::{format_plan_terminal, PlanSummary};
pub use text::generate_text_diff;
pub use types::{ChangePlan, FileOperation, Warning, WarningSeverity};
