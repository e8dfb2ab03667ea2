//! Console progress output for export runs.

use std::path::Path;

use crate::config::DiagramEntry;
use crate::render::{ExportObserver, RenderOutcome, RenderResult, RunSummary};

/// Prints one line before each entry and one line with its outcome.
pub struct ConsoleProgress;

impl ExportObserver for ConsoleProgress {
    fn on_start(&self, _entry: &DiagramEntry, path: &Path) {
        println!("Rendering: {}", path.display());
    }

    fn on_finish(&self, result: &RenderResult) {
        println!("{}", outcome_line(result));
    }
}

/// Status line for a finished entry.
pub fn outcome_line(result: &RenderResult) -> String {
    match &result.outcome {
        RenderOutcome::Written { bytes } => {
            format!("  ✓ {}: {} bytes -> {}", result.name, bytes, result.path.display())
        }
        RenderOutcome::Failed(failure) => format!("  ✗ {}: {}", result.name, failure.message),
    }
}

/// Final `succeeded/total` line.
pub fn summary_line(summary: &RunSummary) -> String {
    format!(
        "Done: {}/{} diagrams rendered",
        summary.succeeded(),
        summary.total()
    )
}

pub fn print_banner(title: &str) {
    println!("{}", "=".repeat(60));
    println!("  {title}");
    println!("{}", "=".repeat(60));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderFailure;
    use std::path::PathBuf;

    fn result(name: &str, outcome: RenderOutcome) -> RenderResult {
        RenderResult {
            name: name.to_string(),
            path: PathBuf::from(format!("/out/{name}.png")),
            outcome,
        }
    }

    #[test]
    fn test_success_line() {
        let line = outcome_line(&result("a", RenderOutcome::Written { bytes: 42 }));
        assert_eq!(line, "  ✓ a: 42 bytes -> /out/a.png");
    }

    #[test]
    fn test_failure_line_carries_error_text() {
        let failure = RenderFailure::new("b", "server returned HTTP 503");
        let line = outcome_line(&result("b", RenderOutcome::Failed(failure)));
        assert_eq!(line, "  ✗ b: server returned HTTP 503");
    }

    #[test]
    fn test_summary_line() {
        let summary = RunSummary {
            results: vec![
                result("a", RenderOutcome::Written { bytes: 1 }),
                result("b", RenderOutcome::Failed(RenderFailure::new("b", "timeout"))),
            ],
        };
        assert_eq!(summary_line(&summary), "Done: 1/2 diagrams rendered");
    }
}
