//! Map a raw reading onto the 0..100 score scale.
//!
//! All rule kinds saturate, so there is no error path: any input produces a
//! score in `[SCORE_MIN, SCORE_MAX]`.

use crate::domain::{Direction, SCORE_MAX, SCORE_MIN, ScoringRule};

/// Score at (and beyond) the healthy threshold of a linear rule.
pub const GOOD_SCORE: f64 = 100.0;
/// Score at (and beyond) the unhealthy threshold of a linear rule.
pub const BAD_SCORE: f64 = 20.0;

/// Score `value` under `rule`.
pub fn normalize(rule: &ScoringRule, value: f64) -> f64 {
    let raw = match *rule {
        ScoringRule::Linear { direction, good, bad } => linear_score(direction, good, bad, value),
        ScoringRule::Step {
            direction,
            threshold,
            pass,
            fail,
        } => {
            if passes_step(direction, threshold, value) {
                pass
            } else {
                fail
            }
        }
        ScoringRule::Constant { score } => score,
    };
    clamp_score(raw)
}

/// Clamp into the score range. NaN maps to the floor.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return SCORE_MIN;
    }
    score.clamp(SCORE_MIN, SCORE_MAX)
}

fn linear_score(direction: Direction, good: f64, bad: f64, value: f64) -> f64 {
    if value.is_nan() {
        return BAD_SCORE;
    }

    let (at_good, at_bad) = match direction {
        Direction::HigherIsBetter => (value >= good, value <= bad),
        Direction::LowerIsBetter => (value <= good, value >= bad),
    };
    if at_good {
        return GOOD_SCORE;
    }
    if at_bad {
        return BAD_SCORE;
    }

    // Strictly inside the band, so `good != bad` and `u` is in (0, 1) for either direction.
    let u = (value - bad) / (good - bad);
    BAD_SCORE + u * (GOOD_SCORE - BAD_SCORE)
}

fn passes_step(direction: Direction, threshold: f64, value: f64) -> bool {
    match direction {
        Direction::HigherIsBetter => value > threshold,
        Direction::LowerIsBetter => value < threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn higher(good: f64, bad: f64) -> ScoringRule {
        ScoringRule::Linear {
            direction: Direction::HigherIsBetter,
            good,
            bad,
        }
    }

    fn lower(good: f64, bad: f64) -> ScoringRule {
        ScoringRule::Linear {
            direction: Direction::LowerIsBetter,
            good,
            bad,
        }
    }

    #[test]
    fn linear_hits_boundary_scores_exactly() {
        let rule = higher(5.0, 3.0);
        assert_eq!(normalize(&rule, 5.0), 100.0);
        assert_eq!(normalize(&rule, 3.0), 20.0);

        let rule = lower(1.5, 5.5);
        assert_eq!(normalize(&rule, 1.5), 100.0);
        assert_eq!(normalize(&rule, 5.5), 20.0);
    }

    #[test]
    fn linear_interpolates_gdp_example() {
        let rule = higher(5.0, 3.0);
        assert!((normalize(&rule, 4.0) - 60.0).abs() < 1e-9);
        assert_eq!(normalize(&rule, 5.5), 100.0);
        assert_eq!(normalize(&rule, 2.0), 20.0);
    }

    #[test]
    fn lower_is_better_matches_overnight_rate_formula() {
        // 130 - 20v over the band [1.5, 5.5].
        let rule = lower(1.5, 5.5);
        for v in [1.6, 2.0, 3.5, 4.25, 5.4] {
            let expected = 130.0 - 20.0 * v;
            assert!((normalize(&rule, v) - expected).abs() < 1e-9, "v={v}");
        }
    }

    #[test]
    fn linear_is_monotone_within_band() {
        let up = higher(55.0, 45.0);
        let down = lower(15.0, 20.0);
        let mut prev_up = f64::NEG_INFINITY;
        let mut prev_down = f64::INFINITY;
        for i in 0..=200 {
            let t = i as f64 / 200.0;
            let s_up = normalize(&up, 40.0 + t * 20.0);
            let s_down = normalize(&down, 10.0 + t * 15.0);
            assert!(s_up >= prev_up, "higher_is_better decreased at step {i}");
            assert!(s_down <= prev_down, "lower_is_better increased at step {i}");
            prev_up = s_up;
            prev_down = s_down;
        }
    }

    #[test]
    fn linear_is_continuous_at_thresholds() {
        let rule = higher(25_000.0, 15_000.0);
        let eps = 1e-6;
        assert!((normalize(&rule, 25_000.0 - eps) - 100.0).abs() < 1e-6);
        assert!((normalize(&rule, 15_000.0 + eps) - 20.0).abs() < 1e-6);
    }

    #[test]
    fn extreme_values_saturate() {
        let rules = [higher(5.0, 3.0), lower(15.0, 20.0)];
        for rule in &rules {
            for v in [f64::MIN, -1e300, -1e9, 0.0, 1e9, 1e300, f64::MAX, f64::INFINITY, f64::NEG_INFINITY] {
                let s = normalize(rule, v);
                assert!((SCORE_MIN..=SCORE_MAX).contains(&s), "score {s} for {v}");
            }
        }
        assert_eq!(normalize(&higher(5.0, 3.0), f64::NAN), BAD_SCORE);
    }

    #[test]
    fn step_uses_strict_comparison() {
        let above = ScoringRule::Step {
            direction: Direction::HigherIsBetter,
            threshold: 9.0,
            pass: 90.0,
            fail: 40.0,
        };
        assert_eq!(normalize(&above, 9.5), 90.0);
        assert_eq!(normalize(&above, 9.0), 40.0);

        let below = ScoringRule::Step {
            direction: Direction::LowerIsBetter,
            threshold: 7.2,
            pass: 100.0,
            fail: 30.0,
        };
        assert_eq!(normalize(&below, 7.18), 100.0);
        assert_eq!(normalize(&below, 7.2), 30.0);
        assert_eq!(normalize(&below, f64::NAN), 30.0);
    }

    #[test]
    fn constant_ignores_reading_and_clamps() {
        let rule = ScoringRule::Constant { score: 80.0 };
        assert_eq!(normalize(&rule, 18.5), 80.0);
        assert_eq!(normalize(&rule, -1e12), 80.0);
        assert_eq!(normalize(&ScoringRule::Constant { score: 140.0 }, 0.0), 100.0);
    }
}
