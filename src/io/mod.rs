//! Input/output helpers.
//!
//! - observation exports (CSV) (`export`)
//! - dashboard JSON read/write (`snapshot`)

pub mod export;
pub mod snapshot;

pub use export::*;
pub use snapshot::*;
