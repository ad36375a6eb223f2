//! Option merging and explicit option-file loading.
//!
//! Callers hand in a `PartialOptions` (from code, an options file, or CLI
//! flags) and receive fully populated `Options`. Defaults:
//! - `passOnlyError`: false
//! - `lintOptions.flags`: empty
//! - `lintOptions.binary`: `gjslint` on `PATH`
//! - `lintOptions.reporter`: disabled
//!
//! The reporter is always forced to `Reporter::Disabled` after merging;
//! rendering results is left to whatever consumes the annotated files.
//!
//! Overrides precedence: CLI > options file > defaults.

use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Executable invoked when no `binary` is configured.
pub const DEFAULT_BINARY: &str = "gjslint";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Reporter mode handed to the linter wrapper. A caller's `ReporterCfg` is
/// accepted on input but never reaches the effective options.
pub enum Reporter {
    #[default]
    Disabled,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
/// `[lintOptions.reporter]` as written by callers.
pub struct ReporterCfg {
    pub name: String,
    #[serde(default)]
    pub dest: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
/// Options passed through to gjslint.
pub struct LintOptionsCfg {
    #[serde(default)]
    pub reporter: Option<ReporterCfg>,
    #[serde(default)]
    pub flags: Option<Vec<String>>,
    #[serde(default)]
    pub binary: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
/// Caller-supplied configuration; every field is optional.
pub struct PartialOptions {
    #[serde(default, rename = "passOnlyError")]
    pub pass_only_error: Option<bool>,
    #[serde(default, rename = "lintOptions")]
    pub lint_options: Option<LintOptionsCfg>,
}

impl PartialOptions {
    /// Layer `over` on top of `self`, field by field.
    pub fn layer(&self, over: &PartialOptions) -> PartialOptions {
        let base = self.lint_options.clone().unwrap_or_default();
        let top = over.lint_options.clone().unwrap_or_default();
        PartialOptions {
            pass_only_error: over.pass_only_error.or(self.pass_only_error),
            lint_options: Some(LintOptionsCfg {
                reporter: top.reporter.or(base.reporter),
                flags: top.flags.or(base.flags),
                binary: top.binary.or(base.binary),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Effective options handed to gjslint for one invocation.
pub struct LintOptions {
    pub reporter: Reporter,
    pub flags: Vec<String>,
    pub binary: PathBuf,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            reporter: Reporter::Disabled,
            flags: Vec::new(),
            binary: PathBuf::from(DEFAULT_BINARY),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Fully-resolved stage configuration.
pub struct Options {
    pub pass_only_error: bool,
    pub lint_options: LintOptions,
}

impl Options {
    /// Merge caller options over the defaults. `None` behaves like an empty
    /// configuration. The input is only read.
    pub fn merge(partial: Option<&PartialOptions>) -> Options {
        let defaults = Options::default();
        let Some(partial) = partial else {
            return defaults;
        };
        let lint = partial.lint_options.clone().unwrap_or_default();
        if let Some(r) = lint.reporter.as_ref() {
            debug!("Ignoring requested reporter '{}'; results are annotated instead", r.name);
        }
        let mut opts = Options {
            pass_only_error: partial
                .pass_only_error
                .unwrap_or(defaults.pass_only_error),
            lint_options: LintOptions {
                reporter: defaults.lint_options.reporter,
                flags: lint.flags.unwrap_or(defaults.lint_options.flags),
                binary: lint.binary.unwrap_or(defaults.lint_options.binary),
            },
        };
        // Rendering belongs to whatever consumes the annotated files
        opts.lint_options.reporter = Reporter::Disabled;
        opts
    }
}

/// Load `PartialOptions` from an explicit TOML or YAML file.
pub fn load_options(path: &Path) -> Result<PartialOptions, ConfigError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let read = || {
        fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    };
    match ext.as_deref() {
        Some("toml") => toml::from_str(&read()?).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        }),
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&read()?).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Resolve `Options` from an optional options file and CLI overrides.
pub fn resolve_options(
    file: Option<&Path>,
    cli_pass_only_error: Option<bool>,
    cli_flags: &[String],
    cli_binary: Option<&Path>,
) -> Result<Options, ConfigError> {
    let from_file = match file {
        Some(p) => load_options(p)?,
        None => PartialOptions::default(),
    };
    let from_cli = PartialOptions {
        pass_only_error: cli_pass_only_error,
        lint_options: Some(LintOptionsCfg {
            reporter: None,
            flags: if cli_flags.is_empty() {
                None
            } else {
                Some(cli_flags.to_vec())
            },
            binary: cli_binary.map(Path::to_path_buf),
        }),
    };
    Ok(Options::merge(Some(&from_file.layer(&from_cli))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_merge_defaults_when_absent() {
        let opts = Options::merge(None);
        assert!(!opts.pass_only_error);
        assert_eq!(opts.lint_options.reporter, Reporter::Disabled);
        assert!(opts.lint_options.flags.is_empty());
        assert_eq!(opts.lint_options.binary, PathBuf::from(DEFAULT_BINARY));
    }

    #[test]
    fn test_reporter_forced_disabled_and_input_untouched() {
        let partial = PartialOptions {
            pass_only_error: Some(true),
            lint_options: Some(LintOptionsCfg {
                reporter: Some(ReporterCfg {
                    name: "console".into(),
                    dest: Some("out.txt".into()),
                }),
                flags: Some(vec!["--strict".into()]),
                binary: None,
            }),
        };
        let before = partial.clone();
        let opts = Options::merge(Some(&partial));
        assert!(opts.pass_only_error);
        assert_eq!(opts.lint_options.reporter, Reporter::Disabled);
        assert_eq!(opts.lint_options.flags, vec!["--strict".to_string()]);
        assert_eq!(partial, before);
    }

    #[test]
    fn test_load_toml_and_yaml_agree() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("gjslint.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
passOnlyError = true
[lintOptions]
flags = ["--nojsdoc", "--max_line_length=120"]
[lintOptions.reporter]
name = "console"
            "#
        )
        .unwrap();
        let mut f = fs::File::create(root.join("gjslint.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
passOnlyError: true
lintOptions:
  flags: ["--nojsdoc", "--max_line_length=120"]
  reporter:
    name: console
            "#
        )
        .unwrap();

        let t = load_options(&root.join("gjslint.toml")).unwrap();
        let y = load_options(&root.join("gjslint.yaml")).unwrap();
        assert_eq!(t, y);
        let opts = Options::merge(Some(&t));
        assert_eq!(opts.lint_options.reporter, Reporter::Disabled);
        assert_eq!(opts.lint_options.flags.len(), 2);
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let err = load_options(Path::new("opts.json")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gjslint.toml");
        fs::write(
            &path,
            "passOnlyError = true\n[lintOptions]\nflags = [\"--strict\"]\nbinary = \"/opt/gjslint\"\n",
        )
        .unwrap();
        let opts = resolve_options(
            Some(&path),
            Some(false),
            &["--nojsdoc".to_string()],
            None,
        )
        .unwrap();
        assert!(!opts.pass_only_error);
        assert_eq!(opts.lint_options.flags, vec!["--nojsdoc".to_string()]);
        assert_eq!(opts.lint_options.binary, PathBuf::from("/opt/gjslint"));
    }
}
