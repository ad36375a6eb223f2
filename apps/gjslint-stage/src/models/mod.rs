//! Shared data models: files flowing through the stage and lint outcomes.

pub mod file;
pub mod outcome;

pub use file::{Contents, SourceFile};
pub use outcome::{Annotation, Diagnostic, FileFailure, LintOutcome};
