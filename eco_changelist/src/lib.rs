//! Changelist synthesis for engineering change orders.
//!
//! Given the original and optimized snapshots of a placed design, this crate
//! derives the ordered list of edit commands (cell resizes and buffer
//! insertions) that turns the first into the second.
//!
//! The pipeline is strictly staged:
//!
//! 1. parse both component tables ([`eco_common::ComponentTable`]),
//! 2. classify the differences ([`classify`]),
//! 3. scan the optimized nets for inserted buffers
//!    ([`eco_common::NetTopologyParser`]),
//! 4. link buffers that reference each other ([`BufferDependencyGraph`]),
//! 5. order them ([`BufferDependencyGraph::topological_order`]),
//! 6. write the commands ([`ChangelistWriter`]).
//!
//! Use [`synthesize_paths`] to run all of it.

mod classify;
mod command;
mod config;
mod error;
mod graph;
mod pipeline;
mod schedule;
mod summary;
mod writer;

pub use crate::classify::*;
pub use crate::command::*;
pub use crate::config::*;
pub use crate::error::*;
pub use crate::graph::*;
pub use crate::pipeline::*;
pub use crate::summary::*;
pub use crate::writer::*;
