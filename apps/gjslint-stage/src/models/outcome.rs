//! Results reported by one gjslint invocation.

use serde::Serialize;
use std::path::PathBuf;

/// Exit code for a clean run.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when the Python interpreter (or the binary) could not be found.
pub const EXIT_NOT_FOUND: i32 = 1;
/// Exit code when linting found problems.
pub const EXIT_LINT_FAILED: i32 = 2;
/// Exit code when gjslint failed to parse its input.
pub const EXIT_PARSE_FAILED: i32 = 3;
/// Exit code for an uncaught gjslint exception.
pub const EXIT_EXCEPTION: i32 = 4;

/// Human-readable description of a gjslint exit code.
pub fn describe_exit_code(code: i32) -> &'static str {
    match code {
        EXIT_SUCCESS => "Linting success",
        EXIT_NOT_FOUND => "Python not found",
        EXIT_LINT_FAILED => "Linting failed",
        EXIT_PARSE_FAILED => "Parsing failed",
        EXIT_EXCEPTION => "gjslint exception",
        _ => "Unknown error",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single diagnostic as printed by gjslint.
pub struct Diagnostic {
    pub line: u32,
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Diagnostics gjslint reported for one file.
pub struct FileFailure {
    pub file: PathBuf,
    pub errors: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Non-clean result of one invocation.
pub struct LintOutcome {
    pub code: i32,
    pub description: String,
    /// Raw diagnostic output, quoted in crash messages.
    pub detail: String,
    pub fails: Vec<FileFailure>,
}

impl LintOutcome {
    pub fn new(code: i32, detail: impl Into<String>, fails: Vec<FileFailure>) -> Self {
        Self {
            code,
            description: describe_exit_code(code).to_string(),
            detail: detail.into(),
            fails,
        }
    }

    /// Codes 0 and 2 are normal outcomes; anything else is a crash.
    pub fn is_crash(&self) -> bool {
        self.code != EXIT_SUCCESS && self.code != EXIT_LINT_FAILED
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Lint data attached to a file for downstream stages.
pub struct Annotation {
    pub success: bool,
    pub results: Option<FileFailure>,
}

impl Annotation {
    pub fn from_failure(fail: Option<FileFailure>) -> Self {
        let success = fail.as_ref().map_or(true, |f| f.errors.is_empty());
        Self {
            success,
            results: fail,
        }
    }
}
