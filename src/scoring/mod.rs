//! Scoring engine.
//!
//! - `normalize`: raw reading -> 0..100 score
//! - `builder`: fetch outcome -> `Observation` (with fallback substitution)
//! - `aggregate`: observations -> dimension means, composite, state, signals

pub mod aggregate;
pub mod builder;
pub mod normalize;

pub use aggregate::*;
pub use builder::*;
pub use normalize::*;
