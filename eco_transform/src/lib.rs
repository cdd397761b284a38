//! Companion transformations over design snapshots.
//!
//! These tools sit next to changelist synthesis in the same flow but share
//! none of its dependency logic:
//!
//! - [`DisplacementReport`] measures how far placed instances moved between
//!   two snapshots,
//! - [`rename_components`] and [`rename_netlist`] retarget cell types to a
//!   different library [`Corner`],
//! - [`strip_backslashes`] removes escape backslashes from a byte stream.

mod backslash;
mod corner;
mod displacement;
mod error;
mod stream;

pub use crate::backslash::*;
pub use crate::corner::*;
pub use crate::displacement::*;
pub use crate::error::*;
