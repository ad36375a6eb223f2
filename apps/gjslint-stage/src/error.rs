//! Error types for the lint stage.
//!
//! Internal failures travel on the output's error channel as [`PluginError`],
//! tagged with the plugin identifier so a pipeline host can tell them apart
//! from errors raised by other stages. Lint findings are never errors; they
//! are attached to files as annotations.

use std::path::PathBuf;
use thiserror::Error;

/// Identifier carried by every error this stage emits.
pub const PLUGIN_NAME: &str = "gulp-gjslint";

/// An error tagged with the plugin that produced it.
#[derive(Debug, Error)]
#[error("[{plugin}] {kind}")]
pub struct PluginError {
    pub plugin: String,
    pub kind: PluginErrorKind,
}

#[derive(Debug, Error)]
pub enum PluginErrorKind {
    /// The file carried live streamed contents; gjslint needs a readable path.
    #[error("Streaming is not supported")]
    StreamingUnsupported,

    /// gjslint exited with a code other than success (0) or lint failure (2).
    #[error("{message}")]
    LinterCrashed { code: i32, message: String },

    /// Input arrived after the stage started finalizing.
    #[error("stage already finalized")]
    StageClosed,
}

impl PluginError {
    pub fn is_linter_crash(&self) -> bool {
        matches!(self.kind, PluginErrorKind::LinterCrashed { .. })
    }
}

/// Builds [`PluginError`] values stamped with a fixed plugin name.
#[derive(Debug, Clone)]
pub struct ErrorFactory {
    plugin: String,
}

impl ErrorFactory {
    pub fn new(plugin: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
        }
    }

    pub fn create(&self, kind: PluginErrorKind) -> PluginError {
        PluginError {
            plugin: self.plugin.clone(),
            kind,
        }
    }

    pub fn streaming_unsupported(&self) -> PluginError {
        self.create(PluginErrorKind::StreamingUnsupported)
    }

    /// Compose the crash message from the linted targets and the linter's
    /// own description and diagnostic output.
    pub fn linter_crashed(
        &self,
        code: i32,
        targets: &[PathBuf],
        description: &str,
        detail: &str,
    ) -> PluginError {
        let joined = targets
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let message = format!(
            "gjslint crashed whilst parsing: {}\nReason: {}\n\n{}",
            joined, description, detail
        );
        self.create(PluginErrorKind::LinterCrashed { code, message })
    }

    pub fn stage_closed(&self) -> PluginError {
        self.create(PluginErrorKind::StageClosed)
    }
}

impl Default for ErrorFactory {
    fn default() -> Self {
        Self::new(PLUGIN_NAME)
    }
}

/// Errors raised while loading options from an explicit file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported config format: {0} (expected .toml, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),
}

/// Errors that stop the command-line host before the stage runs.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("bad glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_carry_plugin_tag() {
        let f = ErrorFactory::default();
        let err = f.streaming_unsupported();
        assert_eq!(err.plugin, PLUGIN_NAME);
        assert_eq!(err.to_string(), "[gulp-gjslint] Streaming is not supported");
    }

    #[test]
    fn test_crash_message_contains_reason_and_detail() {
        let f = ErrorFactory::new("custom");
        let err = f.linter_crashed(
            4,
            &[PathBuf::from("/src/a.js"), PathBuf::from("/src/b.js")],
            "gjslint exception",
            "Traceback: boom",
        );
        assert!(err.is_linter_crash());
        let msg = err.to_string();
        assert!(msg.starts_with("[custom] gjslint crashed whilst parsing: /src/a.js, /src/b.js"));
        assert!(msg.contains("Reason: gjslint exception"));
        assert!(msg.ends_with("\n\nTraceback: boom"));
    }
}
