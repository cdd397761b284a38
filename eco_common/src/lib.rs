//! Record-format plumbing shared across the ECO workspace.
//!
//! This crate reads the two sections of a placed-design snapshot that the
//! changelist tools care about: the component table (instance, cell type,
//! placement) and the net connectivity section. Recoverable problems found
//! while reading are collected in a [`Diagnostics`] sink instead of aborting.

pub mod def;
mod diagnostics;
mod error;
mod escape;
pub mod test_cases;

pub use crate::def::*;
pub use crate::diagnostics::*;
pub use crate::error::*;
pub use crate::escape::*;
