//! Unified text diffs

use similar::TextDiff;

/// Unified diff of two texts with three lines of context
#[must_use]
pub fn generate_text_diff(old: &str, new: &str, label: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{label}"), &format!("b/{label}"))
        .to_string()
}
