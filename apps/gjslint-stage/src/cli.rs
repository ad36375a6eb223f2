//! CLI argument parsing via `clap`.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gjslint-stage",
    version,
    about = "Run gjslint over a batch of files and emit annotated results",
    long_about = "Collects the given files, runs the Closure Linter once over all of them and prints each file with its lint annotation as JSON.\n\nConfiguration precedence: CLI > --config file > defaults.",
    after_help = "Examples:\n  gjslint-stage 'src/**/*.js'\n  gjslint-stage --pass-only-error --flag=--strict src/app.js\n  gjslint-stage --config gjslint.toml 'lib/*.js'",
    arg_required_else_help = true
)]
/// Top-level CLI options.
pub struct Cli {
    #[arg(required = true, help = "Files or glob patterns to lint")]
    pub patterns: Vec<String>,
    #[arg(long, help = "Options file: .toml, .yaml or .yml")]
    pub config: Option<PathBuf>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Emit only files that failed lint")]
    pub pass_only_error: bool,
    #[arg(
        long = "flag",
        allow_hyphen_values = true,
        help = "Flag passed through to gjslint (repeatable)"
    )]
    pub flags: Vec<String>,
    #[arg(long, help = "gjslint executable (default: gjslint on PATH)")]
    pub binary: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::SetTrue, help = "Enable debug logging")]
    pub verbose: bool,
}

impl Cli {
    /// `--pass-only-error` only overrides the options file when present.
    pub fn pass_only_error_override(&self) -> Option<bool> {
        self.pass_only_error.then_some(true)
    }
}
