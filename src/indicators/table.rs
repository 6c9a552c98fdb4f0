//! Validated, immutable indicator table.
//!
//! A table is checked once when it is built; every consumer afterwards can
//! assume thresholds agree with their direction, scores are in range, and ids
//! are unique.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Direction, IndicatorDef, SCORE_MAX, SCORE_MIN, ScoringRule, SeriesSpec};
use crate::error::ConfigError;
use crate::indicators::builtin_indicators;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorTable {
    indicators: Vec<IndicatorDef>,
}

/// On-disk shape of a custom table.
#[derive(Debug, Serialize, Deserialize)]
struct TableFile {
    indicators: Vec<IndicatorDef>,
}

impl IndicatorTable {
    pub fn new(indicators: Vec<IndicatorDef>) -> Result<Self, ConfigError> {
        if indicators.is_empty() {
            return Err(ConfigError::EmptyTable);
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for def in &indicators {
            validate_indicator(def)?;
            if !ids.insert(def.id.as_str()) {
                return Err(ConfigError::DuplicateId(def.id.clone()));
            }
            if !names.insert((def.dimension, def.name.as_str())) {
                return Err(ConfigError::DuplicateName {
                    dimension: def.dimension,
                    name: def.name.clone(),
                });
            }
        }

        Ok(Self { indicators })
    }

    /// The built-in indicator set.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::new(builtin_indicators())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let file: TableFile = serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        Self::new(file.indicators)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    /// Load `path` when given, else the built-in table.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    pub fn indicators(&self) -> &[IndicatorDef] {
        &self.indicators
    }

    pub fn get(&self, id: &str) -> Option<&IndicatorDef> {
        self.indicators.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(&TableFile {
            indicators: self.indicators.clone(),
        })
        .map_err(|e| ConfigError::Json(e.to_string()))
    }
}

/// Check one definition in isolation.
pub fn validate_indicator(def: &IndicatorDef) -> Result<(), ConfigError> {
    if def.id.trim().is_empty() || def.name.trim().is_empty() {
        return Err(ConfigError::MissingName(def.id.clone()));
    }

    validate_rule(&def.rule).map_err(|reason| ConfigError::InvalidRule {
        id: def.id.clone(),
        reason,
    })?;

    if !def.fallback_value.is_finite() {
        return Err(ConfigError::InvalidFallback {
            id: def.id.clone(),
            reason: "value must be finite".to_string(),
        });
    }
    if !in_score_range(def.fallback_score) {
        return Err(ConfigError::InvalidFallback {
            id: def.id.clone(),
            reason: format!("score {} is outside [0, 100]", def.fallback_score),
        });
    }

    if let Some(spec) = &def.series {
        validate_series(spec).map_err(|reason| ConfigError::InvalidSeries {
            id: def.id.clone(),
            reason,
        })?;
    }

    Ok(())
}

fn validate_rule(rule: &ScoringRule) -> Result<(), String> {
    match *rule {
        ScoringRule::Linear { direction, good, bad } => {
            if !(good.is_finite() && bad.is_finite()) {
                return Err("thresholds must be finite".to_string());
            }
            let ordered = match direction {
                Direction::HigherIsBetter => good > bad,
                Direction::LowerIsBetter => good < bad,
            };
            if !ordered {
                return Err(format!(
                    "good={good} and bad={bad} are inconsistent with {direction:?}"
                ));
            }
        }
        ScoringRule::Step {
            threshold, pass, fail, ..
        } => {
            if !threshold.is_finite() {
                return Err("threshold must be finite".to_string());
            }
            if !(in_score_range(pass) && in_score_range(fail)) {
                return Err(format!("scores pass={pass} fail={fail} must be in [0, 100]"));
            }
        }
        ScoringRule::Constant { score } => {
            if !in_score_range(score) {
                return Err(format!("score {score} is outside [0, 100]"));
            }
        }
    }
    Ok(())
}

fn validate_series(spec: &SeriesSpec) -> Result<(), String> {
    match spec {
        SeriesSpec::Latest { series_id, scale } => {
            if series_id.trim().is_empty() {
                return Err("series_id is empty".to_string());
            }
            if !(scale.is_finite() && *scale != 0.0) {
                return Err(format!("scale {scale} must be finite and non-zero"));
            }
        }
        SeriesSpec::MovingAverageGap { series_id, window } => {
            if series_id.trim().is_empty() {
                return Err("series_id is empty".to_string());
            }
            if *window == 0 {
                return Err("window must be at least 1".to_string());
            }
        }
        SeriesSpec::Manual { value } => {
            if !value.is_finite() {
                return Err("manual value must be finite".to_string());
            }
        }
    }
    Ok(())
}

fn in_score_range(score: f64) -> bool {
    score.is_finite() && (SCORE_MIN..=SCORE_MAX).contains(&score)
}
