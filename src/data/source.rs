//! The fetch contract plus the no-network sources.

use std::collections::HashMap;

use crate::domain::{IndicatorDef, RawReading};
use crate::error::FetchError;

/// Retrieves one raw reading per indicator.
///
/// Implementations must be shareable across threads: the pipeline may fetch
/// indicators concurrently.
pub trait IndicatorSource: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &str;

    fn fetch(&self, indicator: &IndicatorDef) -> Result<RawReading, FetchError>;
}

/// A source that always fails, so every indicator renders from its fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSource;

impl IndicatorSource for OfflineSource {
    fn name(&self) -> &str {
        "offline"
    }

    fn fetch(&self, _indicator: &IndicatorDef) -> Result<RawReading, FetchError> {
        Err(FetchError::Offline)
    }
}

/// In-memory readings keyed by indicator id.
///
/// Ids without an entry fail with `FetchError::Unmapped`.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    outcomes: HashMap<String, Result<RawReading, FetchError>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reading(mut self, id: &str, value: f64, as_of: &str) -> Self {
        self.outcomes.insert(
            id.to_string(),
            Ok(RawReading {
                value,
                as_of: as_of.to_string(),
            }),
        );
        self
    }

    pub fn with_failure(mut self, id: &str, err: FetchError) -> Self {
        self.outcomes.insert(id.to_string(), Err(err));
        self
    }
}

impl IndicatorSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self, indicator: &IndicatorDef) -> Result<RawReading, FetchError> {
        self.outcomes
            .get(&indicator.id)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Unmapped(indicator.id.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dimension, ScoringRule};

    fn def(id: &str) -> IndicatorDef {
        IndicatorDef::new(id, id, Dimension::Macro, ScoringRule::Constant { score: 50.0 })
    }

    #[test]
    fn static_source_returns_configured_outcomes() {
        let source = StaticSource::new()
            .with_reading("a", 1.5, "2025-06")
            .with_failure("b", FetchError::Status(503));

        let a = source.fetch(&def("a")).unwrap();
        assert_eq!(a.value, 1.5);
        assert_eq!(a.as_of, "2025-06");
        assert_eq!(source.fetch(&def("b")), Err(FetchError::Status(503)));
        assert_eq!(source.fetch(&def("c")), Err(FetchError::Unmapped("c".to_string())));
    }

    #[test]
    fn offline_source_always_fails() {
        assert_eq!(OfflineSource.fetch(&def("a")), Err(FetchError::Offline));
    }
}
