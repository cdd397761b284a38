//! Error types for changelist synthesis.
//!
//! Every variant is fatal for the run: nothing is written once one of them is
//! raised. Recoverable record problems are [`eco_common::Warning`]s instead.

use std::path::{Path, PathBuf};

use eco_common::RecordError;
use itertools::Itertools;
use thiserror::Error;

/// Errors that abort changelist synthesis.
#[derive(Debug, Error)]
pub enum EcoError {
    /// A snapshot could not be opened or read.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Reading an in-memory or caller-provided stream failed.
    #[error("Failed to read snapshot stream: {0}")]
    Io(#[from] std::io::Error),

    /// Instances of the original snapshot are absent from the optimized one.
    /// A changelist cannot express deletion.
    #[error("{} instance(s) missing from the optimized design: {}", .names.len(), .names.iter().join(", "))]
    VanishedInstances { names: Vec<String> },

    /// Inserted buffers reference each other in a loop.
    #[error("Dependency cycle among inserted buffers; cannot schedule: {}", .cells.iter().join(", "))]
    DependencyCycle { cells: Vec<String> },

    /// The changelist could not be written.
    #[error("Failed to write changelist {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl EcoError {
    /// Create a vanished-instances error.
    pub fn vanished(names: Vec<String>) -> Self {
        Self::VanishedInstances { names }
    }

    /// Create a dependency-cycle error.
    pub fn cycle(cells: Vec<String>) -> Self {
        Self::DependencyCycle { cells }
    }

    /// Create an output error.
    pub fn output(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
