//! The lint stage: buffer files, lint them in one batch, fan results out.
//!
//! gjslint works over a list of paths in a single invocation, so files are
//! held until the input side ends. The stage then runs the linter once,
//! annotates each file gjslint complained about and passes the rest through
//! untouched (or drops them when `pass_only_error` is set).
//!
//! Lifecycle: `Idle -> Buffering -> Finalizing -> Done`. Once finalizing
//! starts, further input is refused with `StageClosed`.

use crate::config::Options;
use crate::error::ErrorFactory;
use crate::linter::{LintRequest, Linter};
use crate::models::outcome::EXIT_LINT_FAILED;
use crate::models::{Annotation, LintOutcome, SourceFile};
use crate::pipeline::Output;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Buffering,
    Finalizing,
    Done,
}

pub struct Stage<L> {
    options: Options,
    linter: L,
    errors: ErrorFactory,
    files: HashMap<PathBuf, SourceFile>,
    state: State,
    lint_failed: bool,
}

impl<L: Linter> Stage<L> {
    pub fn new(options: Options, linter: L) -> Self {
        Self {
            options,
            linter,
            errors: ErrorFactory::default(),
            files: HashMap::new(),
            state: State::Idle,
            lint_failed: false,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn linter(&self) -> &L {
        &self.linter
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Whether the finished run exited with "lint failed", even when no
    /// failure could be tied to a buffered file.
    pub fn lint_failed(&self) -> bool {
        self.lint_failed
    }

    /// Number of files waiting for the batch run.
    pub fn pending(&self) -> usize {
        self.files.len()
    }

    pub fn is_pending(&self, path: &std::path::Path) -> bool {
        self.files.contains_key(path)
    }

    /// Buffer one file. Returning is the acknowledgment for the next input.
    ///
    /// Streamed contents are refused with `StreamingUnsupported`; the file is
    /// dropped and the stage keeps accepting input. A later file with the
    /// same path replaces an earlier one.
    pub fn ingest<O: Output>(&mut self, file: SourceFile, out: &mut O) {
        if matches!(self.state, State::Finalizing | State::Done) {
            warn!("Dropping {} received after end of input", file.path.display());
            out.emit_error(self.errors.stage_closed());
            return;
        }
        if file.is_stream() {
            out.emit_error(self.errors.streaming_unsupported());
            return;
        }
        self.state = State::Buffering;
        if self.files.insert(file.path.clone(), file).is_some() {
            debug!("Replaced previously buffered file");
        }
    }

    /// Run gjslint over everything buffered and distribute the results.
    /// Always ends with `out.finish()` on the first call.
    pub async fn finalize<O: Output>(&mut self, out: &mut O) {
        if matches!(self.state, State::Finalizing | State::Done) {
            out.emit_error(self.errors.stage_closed());
            return;
        }
        self.state = State::Finalizing;
        let files = std::mem::take(&mut self.files);

        let outcome = if files.is_empty() {
            debug!("No files buffered; skipping gjslint");
            None
        } else {
            // Fresh copy so anything done for this run stays scoped to it
            let request = LintRequest {
                src: files.keys().cloned().collect(),
                options: self.options.lint_options.clone(),
            };
            let outcome = self.linter.lint(&request).await;
            if let Some(o) = outcome.as_ref().filter(|o| o.is_crash()) {
                warn!("gjslint exited with code {}: {}", o.code, o.description);
                out.emit_error(self.errors.linter_crashed(
                    o.code,
                    &request.src,
                    &o.description,
                    &o.detail,
                ));
            }
            outcome
        };

        let reported = outcome.as_ref().map_or(0, |o| o.fails.len());
        self.lint_failed = outcome.as_ref().is_some_and(|o| o.code == EXIT_LINT_FAILED);
        let annotated = distribute(outcome, files, self.options.pass_only_error, out);
        if self.lint_failed && annotated == 0 {
            warn!(
                "gjslint reported lint failures but none matched a buffered file ({} parsed)",
                reported
            );
        }
        out.finish();
        self.state = State::Done;
    }
}

/// Attach failures to their files and push them, then pass the remaining
/// files through unless only failures are wanted. Returns how many files
/// were annotated.
fn distribute<O: Output>(
    outcome: Option<LintOutcome>,
    mut files: HashMap<PathBuf, SourceFile>,
    pass_only_error: bool,
    out: &mut O,
) -> usize {
    let mut failed: HashSet<PathBuf> = HashSet::new();
    for fail in outcome.map(|o| o.fails).unwrap_or_default() {
        let path = fail.file.clone();
        match files.remove(&path) {
            Some(mut file) => {
                file.lint = Some(Annotation::from_failure(Some(fail)));
                failed.insert(path);
                out.push(file);
            }
            None if failed.contains(&path) => {
                debug!("Ignoring repeated report for {}", path.display());
            }
            None => {
                warn!("gjslint reported {} which was never buffered", path.display());
            }
        }
    }

    if pass_only_error {
        debug!("Dropping {} passing file(s)", files.len());
        return failed.len();
    }
    for (_, file) in files {
        out.push(file);
    }
    failed.len()
}
