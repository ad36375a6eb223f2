//! gjslint-stage core library.
//!
//! A pipeline stage that buffers incoming files, runs the Closure Linter
//! (`gjslint`) once over all of them when input ends, and annotates each
//! file with the result.
//!
//! High-level modules:
//! - `config`: Option merging and explicit option-file loading.
//! - `error`: Plugin-tagged errors and the factory that builds them.
//! - `models`: File handles, lint outcomes and annotations.
//! - `linter`: The `Linter` seam and the gjslint process driver.
//! - `parse`: gjslint text report parsing.
//! - `stage`: Buffering, the batch lint run and result distribution.
//! - `pipeline`: The `Output` seam and an async driver.
//! - `source`: Pattern expansion and file reading for the CLI host.
//! - `cli`, `output`: Command-line parsing and JSON rendering.
pub mod cli;
pub mod config;
pub mod error;
pub mod linter;
pub mod models;
pub mod output;
pub mod parse;
pub mod pipeline;
pub mod source;
pub mod stage;

pub use config::{Options, PartialOptions};
pub use error::{ErrorFactory, PluginError, PluginErrorKind, PLUGIN_NAME};
pub use linter::{GjslintProcess, LintRequest, Linter};
pub use models::{Annotation, Contents, LintOutcome, SourceFile};
pub use pipeline::{Collected, Output};
pub use stage::{Stage, State};
