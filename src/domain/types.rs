//! Shared domain types.
//!
//! These types are kept serializable so they can be:
//!
//! - loaded from an indicator table JSON file
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Lowest score any indicator can have.
pub const SCORE_MIN: f64 = 0.0;
/// Highest score any indicator can have.
pub const SCORE_MAX: f64 = 100.0;
/// Observations scoring at or above this are listed as supportive, below as risks.
pub const SIGNAL_THRESHOLD: f64 = 60.0;
/// Composite scores strictly above this read as expansion.
pub const EXPANSION_ABOVE: u32 = 70;
/// Composite scores strictly below this read as contraction.
pub const CONTRACTION_BELOW: u32 = 40;

/// One of the five fixed indicator categories.
///
/// `Dimension::ALL` is the canonical order used for summaries and the radar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Macro,
    Liquidity,
    Trend,
    Sentiment,
    Risk,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Macro,
        Dimension::Liquidity,
        Dimension::Trend,
        Dimension::Sentiment,
        Dimension::Risk,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Dimension::Macro => "Macro",
            Dimension::Liquidity => "Liquidity",
            Dimension::Trend => "Trend",
            Dimension::Sentiment => "Sentiment",
            Dimension::Risk => "Risk",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Which side of the threshold pair is healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// How a raw reading becomes a 0–100 score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringRule {
    /// Saturating piecewise-linear map: 100 at `good`, 20 at `bad`, affine in between.
    Linear {
        direction: Direction,
        good: f64,
        bad: f64,
    },
    /// Binary signal with a strict comparison against `threshold`.
    Step {
        direction: Direction,
        threshold: f64,
        pass: f64,
        fail: f64,
    },
    /// Fixed score regardless of the reading.
    Constant { score: f64 },
}

/// Where the provider finds the raw reading for an indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeriesSpec {
    /// Most recent observation of a series, multiplied by `scale`.
    Latest {
        series_id: String,
        #[serde(default = "default_scale")]
        scale: f64,
    },
    /// Percent gap of the latest value over its trailing `window`-point mean.
    MovingAverageGap { series_id: String, window: usize },
    /// Manually maintained proxy; reported with the run date.
    Manual { value: f64 },
}

fn default_scale() -> f64 {
    1.0
}

/// One row of the indicator table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorDef {
    pub id: String,
    pub name: String,
    pub dimension: Dimension,
    pub rule: ScoringRule,
    pub fallback_value: f64,
    pub fallback_score: f64,
    pub positive_band: String,
    pub negative_band: String,
    pub interpretation: String,
    #[serde(default)]
    pub series: Option<SeriesSpec>,
}

impl IndicatorDef {
    /// Start a definition with neutral fallback and empty descriptions.
    pub fn new(id: &str, name: &str, dimension: Dimension, rule: ScoringRule) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            dimension,
            rule,
            fallback_value: 0.0,
            fallback_score: SIGNAL_THRESHOLD,
            positive_band: String::new(),
            negative_band: String::new(),
            interpretation: String::new(),
            series: None,
        }
    }

    pub fn fallback(mut self, value: f64, score: f64) -> Self {
        self.fallback_value = value;
        self.fallback_score = score;
        self
    }

    pub fn bands(mut self, positive: &str, negative: &str) -> Self {
        self.positive_band = positive.to_string();
        self.negative_band = negative.to_string();
        self
    }

    pub fn interpretation(mut self, text: &str) -> Self {
        self.interpretation = text.to_string();
        self
    }

    pub fn series(mut self, spec: SeriesSpec) -> Self {
        self.series = Some(spec);
        self
    }
}

/// A successfully fetched raw value and its reporting period.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    pub value: f64,
    pub as_of: String,
}

/// One scored indicator for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: String,
    pub dimension: Dimension,
    pub name: String,
    pub value: f64,
    pub as_of: String,
    /// `false` when the indicator's fallback was substituted.
    pub is_real: bool,
    pub positive_band: String,
    pub negative_band: String,
    pub interpretation: String,
    pub score: f64,
}

impl Observation {
    /// Label shown next to the value ("live" or "estimated").
    pub fn status_label(&self) -> &'static str {
        if self.is_real { "live" } else { "estimated" }
    }
}

/// Mean score of one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionSummary {
    pub dimension: Dimension,
    /// 0 when `count == 0`.
    pub mean_score: f64,
    pub count: usize,
}

/// Qualitative reading of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketState {
    Expansion,
    Consolidation,
    Contraction,
}

impl MarketState {
    pub fn from_composite(composite: u32) -> Self {
        if composite > EXPANSION_ABOVE {
            MarketState::Expansion
        } else if composite < CONTRACTION_BELOW {
            MarketState::Contraction
        } else {
            MarketState::Consolidation
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarketState::Expansion => "expansion/recovery",
            MarketState::Consolidation => "consolidation",
            MarketState::Contraction => "contraction/recession",
        }
    }
}

/// Everything the presentation layer renders for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub generated_at: DateTime<Local>,
    /// Table order.
    pub observations: Vec<Observation>,
    /// Canonical `Dimension::ALL` order, always five entries.
    pub dimensions: Vec<DimensionSummary>,
    pub composite: u32,
    pub state: MarketState,
    /// Score >= `SIGNAL_THRESHOLD`, encounter order.
    pub supportive: Vec<Observation>,
    /// Score < `SIGNAL_THRESHOLD`, encounter order.
    pub risks: Vec<Observation>,
}

impl Dashboard {
    /// Number of observations that used their fallback.
    pub fn estimated_count(&self) -> usize {
        self.observations.iter().filter(|o| !o.is_real).count()
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Custom indicator table; the built-in table when `None`.
    pub indicators: Option<PathBuf>,
    /// Skip the provider entirely and render from fallbacks.
    pub offline: bool,
    /// Fetch indicators concurrently.
    pub parallel: bool,
    pub cache_ttl_secs: u64,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}
