//! Terminal reporting: summary header, dimension table, observation table, and
//! signal lists.
//!
//! We keep formatting code in one place so:
//! - the scoring code stays clean and testable
//! - output changes are localized

pub mod format;

pub use format::*;
