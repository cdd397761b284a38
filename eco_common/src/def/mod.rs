//! Parsers for the physical-database record format.
//!
//! Only two sections are read: `COMPONENTS` (see [`ComponentTable`]) and the
//! regular `NETS` section (see [`NetTopologyParser`]). Everything else in a
//! snapshot is skipped.

mod component;
mod net;
mod section;

pub use component::*;
pub use net::*;
pub use section::*;
