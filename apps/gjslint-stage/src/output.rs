//! JSON rendering of the stage's output for the CLI host.
//!
//! Formatting lint findings for humans is a reporter's job; the CLI only
//! serializes what the stage emitted so another tool can pick it up.

use crate::pipeline::Collected;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Prefix for fatal CLI messages on stderr.
pub fn error_prefix() -> String {
    if use_colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Number of emitted files that carry a failing annotation.
pub fn failed_count(out: &Collected) -> usize {
    out.files
        .iter()
        .filter(|f| f.lint.as_ref().is_some_and(|a| !a.success))
        .count()
}

/// Compose the report object (pure) for printing and tests.
pub fn compose_report_json(out: &Collected) -> JsonVal {
    let files: Vec<_> = out
        .files
        .iter()
        .map(|f| {
            json!({
                "path": f.path().to_string_lossy(),
                "success": f.lint.as_ref().map(|a| a.success),
                "results": f.lint.as_ref().and_then(|a| a.results.as_ref()),
            })
        })
        .collect();
    let errors: Vec<_> = out
        .errors
        .iter()
        .map(|e| {
            json!({
                "plugin": e.plugin,
                "message": e.kind.to_string(),
            })
        })
        .collect();
    let summary = json!({
        "files": out.files.len(),
        "failed": failed_count(out),
        "errors": out.errors.len(),
    });
    json!({"files": files, "errors": errors, "summary": summary})
}

/// Print the report as pretty JSON on stdout.
pub fn print_report(out: &Collected) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(&compose_report_json(out))?);
    Ok(())
}
