//! Turn fetch outcomes into observations.
//!
//! Every indicator yields exactly one `Observation`. A failed fetch is logged
//! and replaced by the indicator's fallback; it never reaches the caller.

use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::data::IndicatorSource;
use crate::domain::{IndicatorDef, Observation, RawReading};
use crate::error::FetchError;
use crate::indicators::IndicatorTable;
use crate::scoring::normalize::{clamp_score, normalize};

/// Build the observation for one indicator from its fetch outcome.
///
/// `today` labels fallback rows.
pub fn build_observation(def: &IndicatorDef, outcome: Result<RawReading, FetchError>, today: NaiveDate) -> Observation {
    let outcome = outcome.and_then(|reading| {
        if reading.value.is_finite() {
            Ok(reading)
        } else {
            Err(FetchError::NonFinite(reading.value))
        }
    });

    let (value, as_of, is_real, score) = match outcome {
        Ok(reading) => {
            let score = normalize(&def.rule, reading.value);
            debug!(indicator = %def.id, value = reading.value, score, "scored live reading");
            (reading.value, reading.as_of, true, score)
        }
        Err(err) => {
            warn!(indicator = %def.id, error = %err, "fetch failed, using fallback");
            (
                def.fallback_value,
                today.format("%Y-%m-%d").to_string(),
                false,
                clamp_score(def.fallback_score),
            )
        }
    };

    Observation {
        id: def.id.clone(),
        dimension: def.dimension,
        name: def.name.clone(),
        value,
        as_of,
        is_real,
        positive_band: def.positive_band.clone(),
        negative_band: def.negative_band.clone(),
        interpretation: def.interpretation.clone(),
        score,
    }
}

/// Fetch and score every indicator in table order, one at a time.
pub fn build_all<S: IndicatorSource + ?Sized>(table: &IndicatorTable, source: &S, today: NaiveDate) -> Vec<Observation> {
    table
        .indicators()
        .iter()
        .map(|def| build_observation(def, source.fetch(def), today))
        .collect()
}

/// Same as `build_all`, fetching indicators concurrently. Output keeps table order.
pub fn build_all_parallel<S: IndicatorSource + ?Sized>(
    table: &IndicatorTable,
    source: &S,
    today: NaiveDate,
) -> Vec<Observation> {
    table
        .indicators()
        .par_iter()
        .map(|def| build_observation(def, source.fetch(def), today))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{OfflineSource, StaticSource};
    use crate::domain::{Dimension, Direction, ScoringRule};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    fn gdp() -> IndicatorDef {
        IndicatorDef::new(
            "gdp",
            "GDP",
            Dimension::Macro,
            ScoringRule::Linear {
                direction: Direction::HigherIsBetter,
                good: 5.0,
                bad: 3.0,
            },
        )
        .fallback(4.0, 55.0)
        .bands(">5%", "<3%")
        .interpretation("growth")
    }

    #[test]
    fn live_reading_is_normalized() {
        let reading = RawReading {
            value: 4.0,
            as_of: "2025Q1".to_string(),
        };
        let obs = build_observation(&gdp(), Ok(reading), today());
        assert!(obs.is_real);
        assert_eq!(obs.as_of, "2025Q1");
        assert_eq!(obs.value, 4.0);
        assert!((obs.score - 60.0).abs() < 1e-9);
        assert_eq!(obs.positive_band, ">5%");
        assert_eq!(obs.interpretation, "growth");
    }

    #[test]
    fn failure_substitutes_fallback_without_normalizing() {
        // Normalizing the fallback value 4.0 would give 60; the fixed fallback score is 55.
        let obs = build_observation(&gdp(), Err(FetchError::Status(500)), today());
        assert!(!obs.is_real);
        assert_eq!(obs.value, 4.0);
        assert_eq!(obs.as_of, "2025-07-01");
        assert_eq!(obs.score, 55.0);
        assert_eq!(obs.status_label(), "estimated");
    }

    #[test]
    fn non_finite_reading_is_treated_as_failure() {
        let reading = RawReading {
            value: f64::NAN,
            as_of: "2025Q1".to_string(),
        };
        let obs = build_observation(&gdp(), Ok(reading), today());
        assert!(!obs.is_real);
        assert_eq!(obs.score, 55.0);
    }

    #[test]
    fn one_failure_leaves_other_indicators_untouched() {
        let table = IndicatorTable::builtin().unwrap();
        let mut healthy = StaticSource::new();
        for def in table.indicators() {
            healthy = healthy.with_reading(&def.id, def.fallback_value + 1.0, "2025-06-30");
        }
        let broken = healthy.clone().with_failure("m2_yoy", FetchError::Request("timeout".to_string()));

        let baseline = build_all(&table, &healthy, today());
        let degraded = build_all(&table, &broken, today());

        assert_eq!(baseline.len(), table.len());
        assert_eq!(degraded.len(), table.len());
        for (a, b) in baseline.iter().zip(&degraded) {
            if a.id == "m2_yoy" {
                assert!(!b.is_real);
                assert_eq!(b.score, 60.0);
                assert_eq!(b.value, 7.0);
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn offline_source_still_yields_one_row_per_indicator() {
        let table = IndicatorTable::builtin().unwrap();
        let obs = build_all(&table, &OfflineSource, today());
        assert_eq!(obs.len(), table.len());
        assert!(obs.iter().all(|o| !o.is_real));
        for (o, def) in obs.iter().zip(table.indicators()) {
            assert_eq!(o.id, def.id);
            assert_eq!(o.score, def.fallback_score);
        }
    }

    #[test]
    fn parallel_build_matches_sequential() {
        let table = IndicatorTable::builtin().unwrap();
        let source = StaticSource::new()
            .with_reading("gdp_yoy", 5.3, "2025Q2")
            .with_reading("shibor_overnight", 1.2, "2025-06-30")
            .with_failure("usd_cnh", FetchError::Parse("schema changed".to_string()));

        let seq = build_all(&table, &source, today());
        let par = build_all_parallel(&table, &source, today());
        assert_eq!(seq, par);
    }
}
