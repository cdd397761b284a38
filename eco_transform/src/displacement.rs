//! Placement displacement between two snapshots.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use eco_common::{ComponentTable, Diagnostics, Placement};
use serde::Serialize;
use tracing::{debug, info};

use crate::TransformError;

/// How far placed instances moved between an original and an optimized
/// snapshot.
///
/// Only instances with a placement in the original snapshot are measured;
/// each must also be placed in the optimized one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplacementReport {
    /// Placed instances in the original snapshot.
    pub original_placed: usize,
    /// Placed instances in the optimized snapshot.
    pub optimized_placed: usize,
    /// Instances placed in both snapshots.
    pub cells_analyzed: u64,
    /// Sum of Manhattan distances, in database units.
    pub total_displacement: u64,
    /// Mean displacement per analyzed cell.
    pub average_displacement: f64,
    /// Analyzed cells with a non-zero displacement.
    pub cells_moved: u64,
    /// Share of analyzed cells that moved, in percent.
    pub moved_percentage: f64,
    /// Placed instances of the optimized snapshot unknown to the original.
    /// Informational only.
    pub new_cells: u64,
}

impl DisplacementReport {
    /// Compare the placements of two parsed tables.
    pub fn compute(
        original: &ComponentTable,
        optimized: &ComponentTable,
    ) -> Result<Self, TransformError> {
        let optimized_placements: HashMap<&str, Placement> = optimized.placements().collect();

        let mut missing = Vec::new();
        let mut cells_analyzed = 0u64;
        let mut total_displacement = 0u64;
        let mut cells_moved = 0u64;
        let mut original_placed = 0usize;
        for (name, before) in original.placements() {
            original_placed += 1;
            let Some(after) = optimized_placements.get(name) else {
                missing.push(name.to_string());
                continue;
            };
            let distance = before.manhattan(after);
            if distance > 0 {
                debug!("{} moved by {}", name, distance);
                cells_moved += 1;
            }
            total_displacement = total_displacement.saturating_add(distance);
            cells_analyzed += 1;
        }

        if !missing.is_empty() {
            return Err(TransformError::missing(missing));
        }

        let new_cells = optimized
            .placements()
            .filter(|(name, _)| original.get(name).is_none_or(|c| c.placement.is_none()))
            .count() as u64;

        let (average_displacement, moved_percentage) = if cells_analyzed > 0 {
            (
                total_displacement as f64 / cells_analyzed as f64,
                cells_moved as f64 / cells_analyzed as f64 * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        info!(
            "Displacement over {} cells: total {}",
            cells_analyzed, total_displacement
        );
        Ok(Self {
            original_placed,
            optimized_placed: optimized_placements.len(),
            cells_analyzed,
            total_displacement,
            average_displacement,
            cells_moved,
            moved_percentage,
            new_cells,
        })
    }

    /// Parse both snapshots and compare them.
    pub fn from_paths(
        original: impl AsRef<Path>,
        optimized: impl AsRef<Path>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self, TransformError> {
        let original = ComponentTable::from_path(original, diagnostics)?;
        let optimized = ComponentTable::from_path(optimized, diagnostics)?;
        Self::compute(&original, &optimized)
    }
}

impl fmt::Display for DisplacementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Original design has {} components", self.original_placed)?;
        writeln!(f, "Optimized design has {} components", self.optimized_placed)?;
        writeln!(f, "Displacement Statistics:")?;
        writeln!(f, "- Cells analyzed: {}", self.cells_analyzed)?;
        writeln!(f, "- Total displacement: {}", self.total_displacement)?;
        writeln!(
            f,
            "- Average displacement per cell: {:.6}",
            self.average_displacement
        )?;
        writeln!(
            f,
            "- Cells moved: {} out of {} ({:.2}%)",
            self.cells_moved, self.cells_analyzed, self.moved_percentage
        )?;
        write!(
            f,
            "- New cells in optimized design (ignored): {}",
            self.new_cells
        )
    }
}
