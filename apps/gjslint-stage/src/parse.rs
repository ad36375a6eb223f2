//! Parser for gjslint's plain-text report.
//!
//! gjslint prints one section per file with problems:
//!
//! ```text
//! ----- FILE  :  /src/app.js -----
//! Line 4, E:0110: Line too long (104 characters).
//! ```
//!
//! With `--unix_mode` each diagnostic carries its own path instead:
//!
//! ```text
//! /src/app.js:4:(0110) Line too long (104 characters).
//! ```
//!
//! Summary and hint lines are skipped.

use crate::models::{Diagnostic, FileFailure};
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

fn file_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-{5} FILE\s+:\s+(.+?)\s+-{5}$").expect("valid regex"))
}

fn error_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Line (\d+), E:(-?\d+): (.*)$").expect("valid regex"))
}

fn unix_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+?):(\d+):\((-?\d+)\) (.*)$").expect("valid regex"))
}

/// Group reported diagnostics by file, preserving report order.
pub fn parse_report(report: &str) -> Vec<FileFailure> {
    let mut fails: Vec<FileFailure> = Vec::new();
    for raw in report.lines() {
        let line = raw.trim_end();
        if let Some(c) = file_header().captures(line) {
            fails.push(FileFailure {
                file: PathBuf::from(&c[1]),
                errors: Vec::new(),
            });
            continue;
        }
        if let Some(c) = error_line().captures(line) {
            // Diagnostics before any header have no file to attach to
            let Some(current) = fails.last_mut() else {
                continue;
            };
            let Ok(line_no) = c[1].parse::<u32>() else {
                continue;
            };
            current.errors.push(Diagnostic {
                line: line_no,
                code: c[2].to_string(),
                description: c[3].to_string(),
            });
            continue;
        }
        if let Some(c) = unix_line().captures(line) {
            let Ok(line_no) = c[2].parse::<u32>() else {
                continue;
            };
            let file = PathBuf::from(&c[1]);
            let idx = match fails.iter().position(|f| f.file == file) {
                Some(i) => i,
                None => {
                    fails.push(FileFailure {
                        file,
                        errors: Vec::new(),
                    });
                    fails.len() - 1
                }
            };
            fails[idx].errors.push(Diagnostic {
                line: line_no,
                code: c[3].to_string(),
                description: c[4].to_string(),
            });
        }
    }
    fails
}
