//! The external linter seam and its gjslint process implementation.

use crate::config::LintOptions;
use crate::models::outcome::{EXIT_EXCEPTION, EXIT_NOT_FOUND, EXIT_SUCCESS};
use crate::models::LintOutcome;
use crate::parse::parse_report;
use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// One batch request: every path to lint plus the options for this call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintRequest {
    pub src: Vec<PathBuf>,
    pub options: LintOptions,
}

/// Runs a lint pass over a batch of paths.
///
/// `None` means a clean pass. Any other result carries the exit code, its
/// description, raw diagnostic output and the per-file failures.
pub trait Linter {
    fn lint(&self, request: &LintRequest) -> impl Future<Output = Option<LintOutcome>> + Send;
}

/// Invokes the gjslint executable as `<binary> <flags...> <paths...>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GjslintProcess;

impl Linter for GjslintProcess {
    fn lint(&self, request: &LintRequest) -> impl Future<Output = Option<LintOutcome>> + Send {
        let mut cmd = Command::new(&request.options.binary);
        cmd.args(&request.options.flags)
            .args(&request.src)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let binary = request.options.binary.clone();
        let count = request.src.len();
        async move {
            debug!("Running {} over {} file(s)", binary.display(), count);
            let output = match cmd.output().await {
                Ok(o) => o,
                Err(e) => {
                    warn!("Failed to start {}: {}", binary.display(), e);
                    return Some(LintOutcome::new(
                        EXIT_NOT_FOUND,
                        format!("failed to start {}: {}", binary.display(), e),
                        Vec::new(),
                    ));
                }
            };
            // Killed by a signal: no exit code to report
            let code = output.status.code().unwrap_or(EXIT_EXCEPTION);
            if code == EXIT_SUCCESS {
                return None;
            }
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            let fails = parse_report(&stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            debug!("gjslint exited with {} ({} failing file(s))", code, fails.len());
            Some(LintOutcome::new(code, detail, fails))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::models::outcome::EXIT_LINT_FAILED;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn script(dir: &std::path::Path, body: &str) -> PathBuf {
        let p = dir.join("fake-gjslint");
        fs::write(&p, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&p, fs::Permissions::from_mode(0o755)).unwrap();
        p
    }

    fn request(binary: PathBuf, src: &[&str]) -> LintRequest {
        LintRequest {
            src: src.iter().map(PathBuf::from).collect(),
            options: LintOptions {
                binary,
                flags: vec!["--strict".into()],
                ..LintOptions::default()
            },
        }
    }

    #[tokio::test]
    async fn test_clean_exit_is_none() {
        let dir = tempdir().unwrap();
        let bin = script(dir.path(), "exit 0");
        assert!(GjslintProcess.lint(&request(bin, &["/a.js"])).await.is_none());
    }

    #[tokio::test]
    async fn test_lint_failure_parses_report_and_receives_args() {
        let dir = tempdir().unwrap();
        let bin = script(
            dir.path(),
            r#"echo "----- FILE  :  $2 -----"
echo "Line 7, E:0110: Line too long (90 characters). flag=$1"
exit 2"#,
        );
        let out = GjslintProcess
            .lint(&request(bin, &["/src/a.js", "/src/b.js"]))
            .await
            .unwrap();
        assert_eq!(out.code, EXIT_LINT_FAILED);
        assert!(!out.is_crash());
        assert_eq!(out.fails.len(), 1);
        assert_eq!(out.fails[0].file, PathBuf::from("/src/a.js"));
        assert!(out.fails[0].errors[0].description.ends_with("flag=--strict"));
    }

    #[tokio::test]
    async fn test_crash_keeps_stderr_as_detail() {
        let dir = tempdir().unwrap();
        let bin = script(dir.path(), "echo 'Traceback: boom' >&2\nexit 4");
        let out = GjslintProcess.lint(&request(bin, &["/a.js"])).await.unwrap();
        assert!(out.is_crash());
        assert_eq!(out.description, "gjslint exception");
        assert_eq!(out.detail, "Traceback: boom");
    }

    #[tokio::test]
    async fn test_missing_binary_maps_to_not_found() {
        let dir = tempdir().unwrap();
        let out = GjslintProcess
            .lint(&request(dir.path().join("nope"), &["/a.js"]))
            .await
            .unwrap();
        assert_eq!(out.code, EXIT_NOT_FOUND);
        assert!(out.is_crash());
        assert!(out.fails.is_empty());
    }
}
