//! Colorized text of the final report.
use colored::*;

use crate::event::{ExitSummary, Summary};

/// Width of the rules framing a suite name.
const RULE_WIDTH: usize = 60;

/// Report block for a single suite: its name between two rules colored by
/// outcome, followed by its output.
pub fn suite_report(name: &str, summary: &Summary) -> String {
    let rule = "─".repeat(RULE_WIDTH);
    let rule = if summary.failed > 0 {
        rule.red()
    } else {
        rule.green()
    };

    let mut buf = String::with_capacity(summary.output.len() + 3 * RULE_WIDTH);
    buf.push_str("\n\n");
    buf.push_str(&format!("{}\n", rule));
    buf.push_str(&format!("{}\n", name.bold()));
    buf.push_str(&format!("{}\n", rule));
    buf.push_str(&summary.output);
    buf.push('\n');
    buf
}

/// Aggregate line printed last.
pub fn run_report(exit: &ExitSummary) -> String {
    let text = exit.output.white();
    let text = if exit.failed == 0 {
        text.on_green()
    } else {
        text.on_red()
    };
    format!("{}\n", text)
}
