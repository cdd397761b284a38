//! Diffing two component tables.

use eco_common::{ComponentTable, InsertionCandidates};
use tracing::{debug, info};

use crate::{Command, EcoError};

/// The differences between an original and an optimized component table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// One `SizeCell` per instance whose cell type changed, in optimized
    /// record order.
    pub resizes: Vec<Command>,
    /// Instances that exist only in the optimized table.
    pub candidates: InsertionCandidates,
    /// Instances present in both tables with the same cell type.
    pub unchanged: usize,
}

/// Partition the instances of `original` and `optimized`.
///
/// Fails with [`EcoError::VanishedInstances`] if any original instance is
/// absent from the optimized table; all missing names are reported at once.
pub fn classify(
    original: &ComponentTable,
    optimized: &ComponentTable,
) -> Result<Classification, EcoError> {
    let vanished: Vec<String> = original
        .iter()
        .filter(|(name, _)| !optimized.contains(name))
        .map(|(name, _)| name.to_string())
        .collect();
    if !vanished.is_empty() {
        return Err(EcoError::vanished(vanished));
    }

    let mut classification = Classification::default();
    for (name, component) in optimized.iter() {
        match original.cell_type(name) {
            Some(old_type) if old_type != component.cell_type => {
                debug!("resize {}: {} -> {}", name, old_type, component.cell_type);
                classification
                    .resizes
                    .push(Command::size_cell(name, &component.cell_type));
            }
            Some(_) => classification.unchanged += 1,
            None => classification.candidates.insert(name, &component.cell_type),
        }
    }

    info!(
        "Classified {} instances: {} resized, {} new, {} unchanged",
        optimized.len(),
        classification.resizes.len(),
        classification.candidates.len(),
        classification.unchanged
    );
    Ok(classification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_common::Component;

    fn table(cells: &[(&str, &str)]) -> ComponentTable {
        cells
            .iter()
            .map(|(name, cell_type)| (name.to_string(), Component::new(*cell_type, None)))
            .collect()
    }

    #[test]
    fn test_identical_tables() {
        let a = table(&[("u1", "INVx1"), ("u2", "BUFx2")]);
        let classification = classify(&a, &a.clone()).unwrap();

        assert!(classification.resizes.is_empty());
        assert!(classification.candidates.is_empty());
        assert_eq!(classification.unchanged, 2);
    }

    #[test]
    fn test_resize_and_insert() {
        let original = table(&[("u1", "INVx1"), ("u2", "BUFx2")]);
        let optimized = table(&[("u1", "INVx2"), ("u2", "BUFx2"), ("b1", "BUFx4")]);
        let classification = classify(&original, &optimized).unwrap();

        assert_eq!(classification.resizes, vec![Command::size_cell("u1", "INVx2")]);
        assert_eq!(classification.candidates.cell_type("b1"), Some("BUFx4"));
        assert_eq!(classification.unchanged, 1);
    }

    #[test]
    fn test_vanished_instances_are_fatal() {
        let original = table(&[("u1", "INVx1"), ("u2", "BUFx2"), ("u3", "BUFx2")]);
        let optimized = table(&[("u2", "BUFx2")]);

        match classify(&original, &optimized) {
            Err(EcoError::VanishedInstances { names }) => assert_eq!(names, vec!["u1", "u3"]),
            other => panic!("expected vanished instances, got {other:?}"),
        }
    }
}
