//! Shared "dashboard pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! table -> fetch (sequential or parallel) -> observations -> aggregation
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use chrono::{DateTime, Local, Utc};
use tracing::{info, warn};

use crate::cache::DashboardCache;
use crate::data::{HttpSource, IndicatorSource, OfflineSource};
use crate::domain::{Dashboard, DashboardConfig};
use crate::error::AppError;
use crate::indicators::IndicatorTable;
use crate::scoring::{aggregate, build_all, build_all_parallel};

/// Fetch, score, and aggregate every indicator in `table`.
pub fn compute_dashboard(
    table: &IndicatorTable,
    source: &dyn IndicatorSource,
    parallel: bool,
    now: DateTime<Local>,
) -> Dashboard {
    let today = now.date_naive();
    let observations = if parallel {
        build_all_parallel(table, source, today)
    } else {
        build_all(table, source, today)
    };

    let dashboard = aggregate(observations, now);
    info!(
        source = source.name(),
        composite = dashboard.composite,
        state = dashboard.state.label(),
        estimated = dashboard.estimated_count(),
        "dashboard computed"
    );
    dashboard
}

/// Pick the data source for a run.
///
/// An unconfigured provider is not an error: the run degrades to fallbacks.
pub fn source_from_config(config: &DashboardConfig) -> Box<dyn IndicatorSource> {
    if config.offline {
        return Box::new(OfflineSource);
    }
    match HttpSource::from_env() {
        Ok(source) => Box::new(source),
        Err(err) => {
            warn!(error = %err, "provider not configured, rendering from fallbacks");
            Box::new(OfflineSource)
        }
    }
}

/// Table + source + cache, held for the lifetime of a front-end.
pub struct DashboardService {
    table: IndicatorTable,
    source: Box<dyn IndicatorSource>,
    parallel: bool,
    cache: DashboardCache,
}

impl DashboardService {
    pub fn new(table: IndicatorTable, source: Box<dyn IndicatorSource>, parallel: bool, cache_ttl_secs: u64) -> Self {
        Self {
            table,
            source,
            parallel,
            cache: DashboardCache::new(cache_ttl_secs),
        }
    }

    /// Load the table (fatal on configuration errors) and pick the source.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, AppError> {
        let table = IndicatorTable::load_or_builtin(config.indicators.as_deref())?;
        let source = source_from_config(config);
        Ok(Self::new(table, source, config.parallel, config.cache_ttl_secs))
    }

    pub fn table(&self) -> &IndicatorTable {
        &self.table
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// The cached dashboard while fresh, else a newly computed one.
    pub fn current(&mut self) -> &Dashboard {
        let Self {
            table,
            source,
            parallel,
            cache,
        } = self;
        cache.get_or_compute(Utc::now(), || {
            compute_dashboard(table, source.as_ref(), *parallel, Local::now())
        })
    }

    /// Drop the cache and recompute.
    pub fn refresh(&mut self) -> &Dashboard {
        self.cache.invalidate();
        self.current()
    }

    pub fn cache_is_fresh(&self) -> bool {
        self.cache.is_fresh(Utc::now())
    }
}
