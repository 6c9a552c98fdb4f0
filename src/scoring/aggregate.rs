//! Reduce observations to dimension means, the composite score, and signals.
//!
//! All numeric outputs are independent of observation order: scores are sorted
//! before summing so floating-point rounding cannot depend on input order.

use chrono::{DateTime, Local};

use crate::domain::{
    Dashboard, Dimension, DimensionSummary, MarketState, Observation, SCORE_MAX, SIGNAL_THRESHOLD,
};

/// Arithmetic mean, or `None` for no scores.
pub fn mean_score(scores: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut scores: Vec<f64> = scores.into_iter().collect();
    if scores.is_empty() {
        return None;
    }
    scores.sort_by(f64::total_cmp);
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Floor of the mean of all scores; 0 for no observations.
pub fn composite_score(observations: &[Observation]) -> u32 {
    let mean = mean_score(observations.iter().map(|o| o.score)).unwrap_or(0.0);
    mean.clamp(0.0, SCORE_MAX).floor() as u32
}

/// One summary per dimension, in `Dimension::ALL` order.
pub fn summarize_dimensions(observations: &[Observation]) -> Vec<DimensionSummary> {
    Dimension::ALL
        .iter()
        .map(|&dimension| {
            let scores: Vec<f64> = observations
                .iter()
                .filter(|o| o.dimension == dimension)
                .map(|o| o.score)
                .collect();
            let count = scores.len();
            DimensionSummary {
                dimension,
                mean_score: mean_score(scores).unwrap_or(0.0),
                count,
            }
        })
        .collect()
}

/// Split into (supportive, risks) by `SIGNAL_THRESHOLD`, keeping encounter order.
pub fn split_signals(observations: &[Observation]) -> (Vec<Observation>, Vec<Observation>) {
    observations
        .iter()
        .cloned()
        .partition(|o| o.score >= SIGNAL_THRESHOLD)
}

/// Assemble the full dashboard from a run's observations.
pub fn aggregate(observations: Vec<Observation>, generated_at: DateTime<Local>) -> Dashboard {
    let composite = composite_score(&observations);
    let dimensions = summarize_dimensions(&observations);
    let (supportive, risks) = split_signals(&observations);

    Dashboard {
        generated_at,
        observations,
        dimensions,
        composite,
        state: MarketState::from_composite(composite),
        supportive,
        risks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(id: &str, dimension: Dimension, score: f64) -> Observation {
        Observation {
            id: id.to_string(),
            dimension,
            name: id.to_string(),
            value: 0.0,
            as_of: "2025-06-30".to_string(),
            is_real: true,
            positive_band: String::new(),
            negative_band: String::new(),
            interpretation: String::new(),
            score,
        }
    }

    fn one_per_dimension(scores: [f64; 5]) -> Vec<Observation> {
        Dimension::ALL
            .iter()
            .zip(scores)
            .map(|(&d, s)| obs(d.display_name(), d, s))
            .collect()
    }

    #[test]
    fn composite_of_five_dimensions_is_consolidation() {
        let observations = one_per_dimension([80.0, 60.0, 40.0, 90.0, 30.0]);
        let dash = aggregate(observations, Local::now());
        assert_eq!(dash.composite, 60);
        assert_eq!(dash.state, MarketState::Consolidation);
        assert_eq!(dash.state.label(), "consolidation");
    }

    #[test]
    fn composite_truncates_the_mean() {
        let observations = vec![
            obs("a", Dimension::Macro, 70.0),
            obs("b", Dimension::Macro, 71.0),
            obs("c", Dimension::Macro, 71.0),
        ];
        // mean 70.67 -> 70
        assert_eq!(composite_score(&observations), 70);
        assert_eq!(composite_score(&[]), 0);
    }

    #[test]
    fn state_thresholds_are_strict() {
        assert_eq!(MarketState::from_composite(71), MarketState::Expansion);
        assert_eq!(MarketState::from_composite(70), MarketState::Consolidation);
        assert_eq!(MarketState::from_composite(40), MarketState::Consolidation);
        assert_eq!(MarketState::from_composite(39), MarketState::Contraction);
    }

    #[test]
    fn permutation_does_not_change_results() {
        let mut observations = vec![
            obs("a", Dimension::Macro, 100.0),
            obs("b", Dimension::Macro, 33.3),
            obs("c", Dimension::Liquidity, 61.7),
            obs("d", Dimension::Trend, 10.0),
            obs("e", Dimension::Sentiment, 86.2),
            obs("f", Dimension::Risk, 0.1),
            obs("g", Dimension::Liquidity, 45.45),
        ];
        let composite = composite_score(&observations);
        let dims = summarize_dimensions(&observations);

        observations.reverse();
        assert_eq!(composite_score(&observations), composite);
        assert_eq!(summarize_dimensions(&observations), dims);

        observations.rotate_left(3);
        assert_eq!(composite_score(&observations), composite);
        assert_eq!(summarize_dimensions(&observations), dims);
    }

    #[test]
    fn empty_dimension_has_zero_mean() {
        let observations = vec![obs("a", Dimension::Macro, 80.0)];
        let dims = summarize_dimensions(&observations);
        assert_eq!(dims.len(), 5);
        assert_eq!(dims[0].mean_score, 80.0);
        for d in &dims[1..] {
            assert_eq!(d.mean_score, 0.0);
            assert_eq!(d.count, 0);
        }
    }

    #[test]
    fn fallback_row_is_blended_into_its_dimension() {
        let mut fallback = obs("gdp", Dimension::Macro, 60.0);
        fallback.is_real = false;
        let observations = vec![
            fallback,
            obs("pmi", Dimension::Macro, 80.0),
            obs("iva", Dimension::Macro, 80.0),
            obs("retail", Dimension::Macro, 80.0),
        ];
        let dims = summarize_dimensions(&observations);
        assert_eq!(dims[0].dimension, Dimension::Macro);
        assert_eq!(dims[0].count, 4);
        assert!((dims[0].mean_score - 75.0).abs() < 1e-9);
    }

    #[test]
    fn signals_split_at_sixty_in_encounter_order() {
        let observations = vec![
            obs("a", Dimension::Macro, 60.0),
            obs("b", Dimension::Macro, 59.9),
            obs("c", Dimension::Risk, 100.0),
            obs("d", Dimension::Trend, 10.0),
        ];
        let (supportive, risks) = split_signals(&observations);
        let ids = |v: &[Observation]| v.iter().map(|o| o.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&supportive), vec!["a", "c"]);
        assert_eq!(ids(&risks), vec!["b", "d"]);
    }

    #[test]
    fn dimensions_follow_canonical_order() {
        let mut observations = one_per_dimension([1.0, 2.0, 3.0, 4.0, 5.0]);
        observations.reverse();
        let order: Vec<Dimension> = summarize_dimensions(&observations).iter().map(|d| d.dimension).collect();
        assert_eq!(order, Dimension::ALL.to_vec());
    }
}
