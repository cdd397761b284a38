//! Error types for the companion transformations.

use std::path::{Path, PathBuf};

use eco_common::RecordError;
use itertools::Itertools;
use thiserror::Error;

/// Errors that abort a transformation.
#[derive(Debug, Error)]
pub enum TransformError {
    /// An input snapshot could not be opened or read.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Placed instances of the original snapshot have no placement in the
    /// optimized one.
    #[error("{} cell(s) from the original design are missing in the optimized design: {}", .names.len(), .names.iter().join(", "))]
    MissingPlacements { names: Vec<String> },

    /// The requested corner is not a known library corner.
    #[error("Unknown corner '{0}' (expected one of L, R, SL, SRAM)")]
    UnknownCorner(String),

    /// An output file could not be created.
    #[error("Failed to create {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading the input or writing the output failed mid-stream.
    #[error("Failed to transform {} into {}: {source}", .input.display(), .output.display())]
    Stream {
        input: PathBuf,
        output: PathBuf,
        source: std::io::Error,
    },
}

impl TransformError {
    /// Create a missing-placements error.
    pub fn missing(names: Vec<String>) -> Self {
        Self::MissingPlacements { names }
    }

    /// Create an output error.
    pub fn output(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a mid-stream error.
    pub fn stream(input: impl AsRef<Path>, output: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Stream {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            source,
        }
    }
}
