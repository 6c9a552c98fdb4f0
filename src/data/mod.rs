//! Indicator data sources.
//!
//! - `IndicatorSource`: the fetch contract the scoring engine consumes
//! - `HttpSource`: observations API over blocking HTTP
//! - `OfflineSource` / `StaticSource`: no-network sources

pub mod http;
pub mod source;

pub use http::HttpSource;
pub use source::*;
