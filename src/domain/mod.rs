//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the indicator table vocabulary (`Dimension`, `Direction`, `ScoringRule`, `SeriesSpec`, `IndicatorDef`)
//! - per-run records (`RawReading`, `Observation`)
//! - aggregation outputs (`DimensionSummary`, `MarketState`, `Dashboard`)

pub mod types;

pub use types::*;
