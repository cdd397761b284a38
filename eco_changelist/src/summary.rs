//! Run summary.

use std::collections::BTreeMap;
use std::fmt;

use eco_common::{Diagnostics, WarningKind};
use serde::Serialize;

/// Counts describing one synthesis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangelistSummary {
    /// `size_cell` commands emitted.
    pub resized: usize,
    /// `insert_buffer` commands emitted.
    pub inserted_buffers: usize,
    /// Instances found only in the optimized snapshot.
    pub new_instances: usize,
    /// Instances identical in both snapshots.
    pub unchanged: usize,
    /// Recovered record problems, by kind.
    pub warnings: BTreeMap<WarningKind, usize>,
}

impl ChangelistSummary {
    /// Fill the warning counts from `diagnostics`.
    pub fn with_diagnostics(mut self, diagnostics: &Diagnostics) -> Self {
        self.warnings = diagnostics.counts();
        self
    }

    /// Total number of commands.
    pub fn commands(&self) -> usize {
        self.resized + self.inserted_buffers
    }

    /// Pretty-printed JSON form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ChangelistSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Changelist generation completed:")?;
        writeln!(f, "- Resized instances: {}", self.resized)?;
        writeln!(f, "- Inserted buffers: {}", self.inserted_buffers)?;
        writeln!(f, "- New instances: {}", self.new_instances)?;
        write!(f, "- Unchanged instances: {}", self.unchanged)?;
        for (kind, count) in &self.warnings {
            write!(f, "\n- Warnings ({kind}): {count}")?;
        }
        Ok(())
    }
}
