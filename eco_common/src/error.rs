//! Error types for reading snapshot sources.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while opening or streaming a snapshot source.
///
/// Malformed records are never reported here; they are recovered locally and
/// recorded as [`crate::Warning`]s. Only conditions that make the whole source
/// unusable end up as a `RecordError`.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The source could not be opened.
    #[error("Failed to open {}: {source}", .path.display())]
    SourceOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The source was opened but reading from it failed part way.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RecordError {
    /// Create a source-open error.
    pub fn source_open(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::SourceOpen {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a read error.
    pub fn read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Path of the source the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::SourceOpen { path, .. } | Self::Read { path, .. } => path,
        }
    }
}

/// Open `path` for buffered line reading.
pub fn open_source(path: impl AsRef<Path>) -> Result<std::io::BufReader<std::fs::File>, RecordError> {
    let path = path.as_ref();
    std::fs::File::open(path)
        .map(std::io::BufReader::new)
        .map_err(|e| RecordError::source_open(path, e))
}
