//! In-flight file handles.

use crate::models::outcome::Annotation;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncRead;

/// How a file's contents are materialized.
pub enum Contents {
    /// Contents fully read into memory.
    Buffer(Vec<u8>),
    /// A live byte stream. gjslint reads paths itself, so these are rejected.
    Stream(Box<dyn AsyncRead + Send + Unpin>),
    /// No contents (directories, entries read with `read = false`).
    Null,
}

impl fmt::Debug for Contents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contents::Buffer(b) => f.debug_tuple("Buffer").field(&b.len()).finish(),
            Contents::Stream(_) => f.write_str("Stream(..)"),
            Contents::Null => f.write_str("Null"),
        }
    }
}

/// One file flowing through the pipeline, plus the annotation this stage
/// attaches when gjslint reports on it.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub contents: Contents,
    pub lint: Option<Annotation>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, contents: Contents) -> Self {
        Self {
            path: path.into(),
            contents,
            lint: None,
        }
    }

    pub fn buffer(path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(path, Contents::Buffer(bytes.into()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_stream(&self) -> bool {
        matches!(self.contents, Contents::Stream(_))
    }
}
