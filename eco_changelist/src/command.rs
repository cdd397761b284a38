//! ECO commands and their textual form.

use std::fmt;

use eco_common::{InsertedBuffer, PinRef};
use itertools::Itertools;

/// One edit of the changelist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Swap an existing instance to a different cell type.
    SizeCell {
        instance_name: String,
        new_cell_type: String,
    },
    /// Insert a new buffer on an existing net, driving `load_pins`.
    InsertBuffer {
        load_pins: Vec<PinRef>,
        cell_type: String,
        cell_name: String,
        net_name: String,
    },
}

impl Command {
    /// Create a `SizeCell` command.
    pub fn size_cell(instance_name: impl Into<String>, new_cell_type: impl Into<String>) -> Self {
        Self::SizeCell {
            instance_name: instance_name.into(),
            new_cell_type: new_cell_type.into(),
        }
    }

    /// Whether this is a `SizeCell`.
    pub const fn is_size_cell(&self) -> bool {
        matches!(self, Self::SizeCell { .. })
    }

    /// Whether this is an `InsertBuffer`.
    pub const fn is_insert_buffer(&self) -> bool {
        matches!(self, Self::InsertBuffer { .. })
    }

    /// The instance this command creates or modifies.
    pub fn instance_name(&self) -> &str {
        match self {
            Self::SizeCell { instance_name, .. } => instance_name,
            Self::InsertBuffer { cell_name, .. } => cell_name,
        }
    }
}

impl From<InsertedBuffer> for Command {
    fn from(buffer: InsertedBuffer) -> Self {
        Self::InsertBuffer {
            load_pins: buffer.load_pins,
            cell_type: buffer.cell_type,
            cell_name: buffer.cell_name,
            net_name: buffer.net_name,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeCell {
                instance_name,
                new_cell_type,
            } => write!(f, "size_cell {instance_name} {new_cell_type}"),
            Self::InsertBuffer {
                load_pins,
                cell_type,
                cell_name,
                net_name,
            } => write!(
                f,
                "insert_buffer {{{}}} {cell_type} {cell_name} {net_name}",
                load_pins.iter().join(" ")
            ),
        }
    }
}
