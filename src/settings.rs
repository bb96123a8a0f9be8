//! Runtime settings for the report binary, read from the environment

use crate::{DashboardError, Result};
use mismatch_feed::synthetic::DEFAULT_HISTORY_DAYS;
use std::path::PathBuf;
use std::str::FromStr;
use trend_forecast::ForecastConfig;

/// Synthetic history used when no CSV file is configured
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HistorySource {
    /// Sine wave with jitter ending today
    #[default]
    Sinusoidal,
    /// Incident timeline counts ending today
    Incidents,
    /// Evolution page counts for the named flow
    Flow(String),
}

impl FromStr for HistorySource {
    type Err = DashboardError;

    fn from_str(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        match raw {
            "sinusoidal" => Ok(HistorySource::Sinusoidal),
            "incidents" => Ok(HistorySource::Incidents),
            _ => match raw.strip_prefix("flow:").map(str::trim) {
                Some(flow) if !flow.is_empty() => Ok(HistorySource::Flow(flow.to_string())),
                _ => Err(DashboardError::Config(format!(
                    "FORECAST_HISTORY_SOURCE '{}': expected sinusoidal, incidents or flow:<name>",
                    raw
                ))),
            },
        }
    }
}

/// Where the panel history comes from and how the forecast is seeded
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    /// Forecaster parameters
    pub forecast: ForecastConfig,
    /// Seed for history synthesis and forecast noise, random when `None`
    pub seed: Option<u64>,
    /// CSV history file; synthetic history is used when `None`
    pub history_csv: Option<PathBuf>,
    /// Synthetic generator, ignored when a CSV file is set
    pub history_source: HistorySource,
    /// Length of synthetic history
    pub history_days: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            forecast: ForecastConfig::dashboard(),
            seed: None,
            history_csv: None,
            history_source: HistorySource::default(),
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }
}

impl RunSettings {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup.
    ///
    /// Forecast parameters default to the dashboard preset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|raw| !raw.trim().is_empty());

        let mut forecast = ForecastConfig::from_lookup(&lookup)?;
        if value("FORECAST_SLOPE_LABEL_DAYS").is_none() {
            forecast.slope_label_days = ForecastConfig::dashboard().slope_label_days;
        }

        let seed = value("FORECAST_SEED")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| DashboardError::Config(format!("FORECAST_SEED '{}': {}", raw, e)))
            })
            .transpose()?;

        let history_days = match value("FORECAST_HISTORY_DAYS") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                DashboardError::Config(format!("FORECAST_HISTORY_DAYS '{}': {}", raw, e))
            })?,
            None => DEFAULT_HISTORY_DAYS,
        };
        if history_days == 0 {
            return Err(DashboardError::Config(
                "FORECAST_HISTORY_DAYS must be positive".to_string(),
            ));
        }

        let history_source = value("FORECAST_HISTORY_SOURCE")
            .map(|raw| raw.parse::<HistorySource>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            forecast,
            seed,
            history_csv: value("FORECAST_HISTORY_CSV").map(PathBuf::from),
            history_source,
            history_days,
        })
    }
}
