//! Expand CLI patterns into files and read them for the stage.

use crate::error::CliError;
use crate::models::{Contents, SourceFile};
use glob::glob;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Expand glob patterns relative to `root` into unique absolute paths.
pub fn expand_patterns(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, CliError> {
    let mut targets: BTreeSet<PathBuf> = BTreeSet::new();
    for pat in patterns {
        let abs_glob = if Path::new(pat).is_absolute() {
            PathBuf::from(pat)
        } else {
            root.join(pat)
        };
        let pattern = abs_glob.to_string_lossy().to_string();
        let before = targets.len();
        for entry in glob(&pattern)? {
            match entry {
                Ok(p) => {
                    targets.insert(p);
                }
                Err(e) => warn!("Skipping unreadable match: {}", e),
            }
        }
        if targets.len() == before {
            warn!("Pattern matched no files: {}", pat);
        }
    }
    Ok(targets.into_iter().collect())
}

/// Read one path into a `SourceFile`. Directories carry no contents.
pub async fn read_source(path: PathBuf) -> Result<SourceFile, CliError> {
    let meta = tokio::fs::metadata(&path)
        .await
        .map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
    if meta.is_dir() {
        return Ok(SourceFile::new(path, Contents::Null));
    }
    let bytes = tokio::fs::read(&path).await.map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(SourceFile::buffer(path, bytes))
}

/// Read every path up front. Any unreadable file fails the whole batch
/// before the stage sees a single input.
pub async fn read_all(paths: Vec<PathBuf>) -> Result<Vec<SourceFile>, CliError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(read_source(path).await?);
    }
    debug!("Read {} file(s)", files.len());
    Ok(files)
}

/// Send already-read files to the stage input. Stops early if the
/// receiving side goes away.
pub async fn feed(files: Vec<SourceFile>, tx: mpsc::Sender<SourceFile>) {
    for file in files {
        if tx.send(file).await.is_err() {
            debug!("Stage input closed early");
            break;
        }
    }
}
