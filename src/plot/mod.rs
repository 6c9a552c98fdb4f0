//! Radar-chart geometry and ASCII rendering.

pub mod radar;

pub use radar::*;
