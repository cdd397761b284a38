//! Ordering inserted buffers.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use contracts::*;
use eco_common::InsertedBuffer;
use tracing::{debug, error};

use crate::{BufferDependencyGraph, EcoError};

impl BufferDependencyGraph {
    /// Compute an emission order of the buffers.
    ///
    /// Returns record indices such that every buffer comes after all buffers
    /// it references. Among buffers that are ready at the same time, the one
    /// with the lowest record index goes first, so the order is stable across
    /// runs.
    ///
    /// Fails with [`EcoError::DependencyCycle`] naming every buffer that could
    /// not be scheduled, in record order.
    #[ensures(ret.is_err() || ret.as_ref().is_ok_and(|order| order.len() == self.len()))]
    pub fn topological_order(&self) -> Result<Vec<usize>, EcoError> {
        let mut in_degree = vec![0usize; self.len()];
        for &(_, after) in self.edges() {
            in_degree[after] += 1;
        }

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(i, _)| Reverse(i))
            .collect();

        let mut order = Vec::with_capacity(self.len());
        while let Some(Reverse(next)) = ready.pop() {
            order.push(next);
            for &succ in self.successors(next) {
                in_degree[succ] -= 1;
                if in_degree[succ] == 0 {
                    ready.push(Reverse(succ));
                }
            }
        }

        if order.len() < self.len() {
            let cells: Vec<String> = self
                .nodes()
                .iter()
                .zip(&in_degree)
                .filter(|(_, degree)| **degree > 0)
                .map(|(node, _)| node.cell_name.clone())
                .collect();
            error!("Cycle among {} inserted buffers", cells.len());
            return Err(EcoError::cycle(cells));
        }

        debug!("Scheduled {} buffers", order.len());
        Ok(order)
    }

    /// Consume the graph, returning its buffers in emission order.
    pub fn into_ordered(self) -> Result<Vec<InsertedBuffer>, EcoError> {
        let order = self.topological_order()?;
        let mut slots: Vec<Option<InsertedBuffer>> =
            self.into_nodes().into_iter().map(Some).collect();
        Ok(order
            .into_iter()
            .filter_map(|i| slots.get_mut(i).and_then(Option::take))
            .collect())
    }
}
