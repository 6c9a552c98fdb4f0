//! The indicator table: which indicators exist, how each one is scored, and
//! what to show when its data is unavailable.

pub mod builtin;
pub mod table;

pub use builtin::builtin_indicators;
pub use table::*;
