//! Change plan formatting for dry runs

use crate::diff::{ChangePlan, FileOperation, WarningSeverity};
use std::fmt::Write;

/// Format a change plan for terminal display
#[must_use]
pub fn format_plan_terminal(plan: &ChangePlan) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "=== Change Plan ===");
    let _ = writeln!(output, "{}", PlanSummary::from_plan(plan).one_line());
    let _ = writeln!(output);

    if !plan.warnings.is_empty() {
        let _ = writeln!(output, "Warnings:");
        for warning in &plan.warnings {
            let prefix = match warning.severity {
                WarningSeverity::Info => "[INFO]",
                WarningSeverity::Warning => "[WARN]",
                WarningSeverity::Error => "[ERROR]",
            };
            let _ = writeln!(output, "  {} {}", prefix, warning.message);
        }
        let _ = writeln!(output);
    }

    for op in &plan.operations {
        match op {
            FileOperation::Create { path, content } => {
                let _ = writeln!(output, "CREATE: {} ({} bytes)", path.display(), content.len());
            }
            FileOperation::Modify { path, diff, .. } => {
                let _ = writeln!(output, "MODIFY: {}", path.display());
                output.push_str(diff);
                let _ = writeln!(output);
            }
        }
    }

    output
}

/// Summary statistics for a change plan
#[derive(Debug, Default)]
pub struct PlanSummary {
    /// Files to create
    pub creates: usize,
    /// Files to modify
    pub modifies: usize,
    /// Total bytes to be written
    pub total_bytes: usize,
}

impl PlanSummary {
    /// Generate summary from a change plan
    #[must_use]
    pub fn from_plan(plan: &ChangePlan) -> Self {
        let mut summary = Self::default();

        for op in &plan.operations {
            match op {
                FileOperation::Create { content, .. } => {
                    summary.creates += 1;
                    summary.total_bytes += content.len();
                }
                FileOperation::Modify { new_content, .. } => {
                    summary.modifies += 1;
                    summary.total_bytes += new_content.len();
                }
            }
        }

        summary
    }

    /// Format as a one-line summary
    #[must_use]
    pub fn one_line(&self) -> String {
        format!(
            "{} create(s), {} modify(s) - {} bytes total",
            self.creates, self.modifies, self.total_bytes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_format_plan_terminal() {
        let mut plan = ChangePlan::new(Path::new("/tmp/p"));
        plan.create("src/main/java/Foo.java", "class Foo {}");
        plan.modify("pom.xml", "a\n", "b\n");

        let text = format_plan_terminal(&plan);
        assert!(text.contains("1 create(s), 1 modify(s)"));
        assert!(text.contains("CREATE: src/main/java/Foo.java (12 bytes)"));
        assert!(text.contains("MODIFY: pom.xml"));
        assert!(text.contains("+b"));
    }
}
