//! Observations API over blocking HTTP.
//!
//! The provider speaks the FRED observations shape:
//! `{"observations": [{"date": "2025-06-30", "value": "5.2"}, ...]}` where `"."`
//! marks a missing value. Each indicator names its series through `SeriesSpec`.

use std::time::Duration;

use chrono::{Local, NaiveDate};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::data::source::IndicatorSource;
use crate::domain::{IndicatorDef, RawReading, SeriesSpec};
use crate::error::{AppError, FetchError};

const URL_VAR: &str = "PULSE_API_URL";
const KEY_VAR: &str = "PULSE_API_KEY";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Observations requested for a plain latest-value lookup.
const LATEST_LIMIT: usize = 10;
/// Extra observations requested beyond a moving-average window, to ride over gaps.
const WINDOW_SLACK: usize = 10;

pub struct HttpSource {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpSource {
    /// Build from `PULSE_API_URL` / `PULSE_API_KEY` (a `.env` file is honored).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var(URL_VAR)
            .map_err(|_| AppError::new(2, format!("Missing {URL_VAR} in environment (.env).")))?;
        let api_key = std::env::var(KEY_VAR).ok().filter(|k| !k.trim().is_empty());
        Self::new(base_url, api_key)
    }

    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
        })
    }

    fn fetch_series(&self, series_id: &str, limit: usize) -> Result<Vec<(NaiveDate, f64)>, FetchError> {
        let limit = limit.to_string();
        let mut req = self.client.get(&self.base_url).query(&[
            ("series_id", series_id),
            ("file_type", "json"),
            ("sort_order", "desc"),
            ("limit", limit.as_str()),
        ]);
        if let Some(key) = &self.api_key {
            req = req.query(&[("api_key", key.as_str())]);
        }

        let resp = req.send().map_err(|e| FetchError::Request(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }

        let body: ObservationsResponse = resp.json().map_err(|e| FetchError::Parse(e.to_string()))?;
        let out = parse_observations(body)?;
        debug!(series_id, n = out.len(), "fetched series");
        Ok(out)
    }
}

impl IndicatorSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self, indicator: &IndicatorDef) -> Result<RawReading, FetchError> {
        match &indicator.series {
            None => Err(FetchError::Unmapped(indicator.id.clone())),
            Some(SeriesSpec::Manual { value }) => Ok(RawReading {
                value: *value,
                as_of: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            }),
            Some(SeriesSpec::Latest { series_id, scale }) => {
                let obs = self.fetch_series(series_id, LATEST_LIMIT)?;
                latest_reading(series_id, &obs, *scale)
            }
            Some(SeriesSpec::MovingAverageGap { series_id, window }) => {
                let obs = self.fetch_series(series_id, window + WINDOW_SLACK)?;
                moving_average_gap(series_id, &obs, *window)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<ApiObservation>,
}

#[derive(Debug, Deserialize)]
struct ApiObservation {
    date: String,
    value: String,
}

fn parse_observations(body: ObservationsResponse) -> Result<Vec<(NaiveDate, f64)>, FetchError> {
    let mut out = Vec::with_capacity(body.observations.len());
    for obs in body.observations {
        let Some(value) = parse_value(&obs.value) else {
            continue;
        };
        let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d")
            .map_err(|e| FetchError::Parse(format!("invalid date '{}': {e}", obs.date)))?;
        out.push((date, value));
    }
    Ok(out)
}

fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// Most recent observation, scaled.
fn latest_reading(series_id: &str, obs: &[(NaiveDate, f64)], scale: f64) -> Result<RawReading, FetchError> {
    let (date, value) = obs
        .iter()
        .max_by_key(|(d, _)| *d)
        .ok_or_else(|| FetchError::Empty(series_id.to_string()))?;
    let value = value * scale;
    if !value.is_finite() {
        return Err(FetchError::NonFinite(value));
    }
    Ok(RawReading {
        value,
        as_of: date.to_string(),
    })
}

/// Percent gap of the latest observation over the mean of the last `window` observations.
fn moving_average_gap(series_id: &str, obs: &[(NaiveDate, f64)], window: usize) -> Result<RawReading, FetchError> {
    if window == 0 || obs.len() < window {
        return Err(FetchError::InsufficientHistory {
            series_id: series_id.to_string(),
            needed: window.max(1),
            got: obs.len(),
        });
    }

    let mut sorted = obs.to_vec();
    sorted.sort_by_key(|(d, _)| *d);
    let tail = &sorted[sorted.len() - window..];
    let mean = tail.iter().map(|(_, v)| v).sum::<f64>() / window as f64;
    let (date, close) = tail[tail.len() - 1];

    if !(mean.is_finite() && mean > 0.0) {
        return Err(FetchError::NonFinite(mean));
    }

    Ok(RawReading {
        value: (close / mean - 1.0) * 100.0,
        as_of: date.to_string(),
    })
}
