//! Time-bounded reuse of the last computed dashboard.
//!
//! Staleness is the only key: within the TTL, every caller gets the same
//! dashboard back and the provider is not contacted.

use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::Dashboard;

/// Default time-to-live (one hour).
pub const DEFAULT_TTL_SECS: u64 = 3600;
const MAX_TTL_SECS: i64 = 365 * 24 * 3600;

#[derive(Debug, Clone)]
pub struct DashboardCache {
    ttl: TimeDelta,
    entry: Option<CacheEntry>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    computed_at: DateTime<Utc>,
    dashboard: Dashboard,
}

impl DashboardCache {
    pub fn new(ttl_secs: u64) -> Self {
        let secs = i64::try_from(ttl_secs).unwrap_or(MAX_TTL_SECS).min(MAX_TTL_SECS);
        Self {
            ttl: TimeDelta::seconds(secs),
            entry: None,
        }
    }

    /// Whether a cached dashboard is still valid at `now`.
    ///
    /// An entry stamped in the future (clock moved backwards) counts as stale.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.entry.as_ref().is_some_and(|e| {
            let age = now - e.computed_at;
            age >= TimeDelta::zero() && age < self.ttl
        })
    }

    /// Age of the cached dashboard at `now`, if any.
    pub fn age(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.entry.as_ref().map(|e| now - e.computed_at)
    }

    /// Return the cached dashboard while fresh, else compute and store a new one.
    pub fn get_or_compute<F>(&mut self, now: DateTime<Utc>, compute: F) -> &Dashboard
    where
        F: FnOnce() -> Dashboard,
    {
        if !self.is_fresh(now) {
            self.entry = None;
        }
        let entry = self.entry.get_or_insert_with(|| CacheEntry {
            computed_at: now,
            dashboard: compute(),
        });
        &entry.dashboard
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
