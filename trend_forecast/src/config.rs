//! Forecaster configuration

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default number of days projected
pub const DEFAULT_HORIZON_DAYS: usize = 7;
/// Default trailing window for the base slope
pub const DEFAULT_TREND_WINDOW_DAYS: usize = 10;
/// Trailing window the dashboard uses for its slope KPI
pub const DASHBOARD_SLOPE_LABEL_DAYS: usize = 7;
/// Default alert threshold
pub const DEFAULT_ALERT_THRESHOLD: f64 = 50.0;
/// Default half-width of the confidence band, as a fraction of the mean
pub const DEFAULT_CONFIDENCE_FRACTION: f64 = 0.10;
/// Default lower clamp for projected means
pub const DEFAULT_VALID_MIN: f64 = 10.0;
/// Default upper clamp for projected means
pub const DEFAULT_VALID_MAX: f64 = 100.0;
/// Default unit appended to the slope label
pub const DEFAULT_RATE_UNIT: &str = "mismatches/day";

/// Parameters of a forecast run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of future days to project; zero yields an empty forecast
    pub horizon_days: usize,
    /// Trailing days used to estimate the base slope
    pub trend_window_days: usize,
    /// Trailing days used for the display slope, `None` reuses the trend window
    pub slope_label_days: Option<usize>,
    /// Count at which a projected day is considered an alert
    pub alert_threshold: f64,
    /// Band half-width as a fraction of the mean, in `[0, 1)`
    pub confidence_fraction: f64,
    /// Lower clamp for projected means
    pub valid_min: f64,
    /// Upper clamp for projected means
    pub valid_max: f64,
    /// Unit appended to the slope label
    pub rate_unit: String,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            trend_window_days: DEFAULT_TREND_WINDOW_DAYS,
            slope_label_days: None,
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            confidence_fraction: DEFAULT_CONFIDENCE_FRACTION,
            valid_min: DEFAULT_VALID_MIN,
            valid_max: DEFAULT_VALID_MAX,
            rate_unit: DEFAULT_RATE_UNIT.to_string(),
        }
    }
}

impl ForecastConfig {
    /// Preset used by the dashboard forecast panel (7-day slope KPI)
    pub fn dashboard() -> Self {
        Self {
            slope_label_days: Some(DASHBOARD_SLOPE_LABEL_DAYS),
            ..Self::default()
        }
    }

    /// Set the horizon
    pub fn with_horizon(mut self, horizon_days: usize) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    /// Set the trend window
    pub fn with_trend_window(mut self, trend_window_days: usize) -> Self {
        self.trend_window_days = trend_window_days;
        self
    }

    /// Set the alert threshold
    pub fn with_alert_threshold(mut self, alert_threshold: f64) -> Self {
        self.alert_threshold = alert_threshold;
        self
    }

    /// Set the confidence fraction
    pub fn with_confidence_fraction(mut self, confidence_fraction: f64) -> Self {
        self.confidence_fraction = confidence_fraction;
        self
    }

    /// Set the clamp range for projected means
    pub fn with_valid_range(mut self, valid_min: f64, valid_max: f64) -> Self {
        self.valid_min = valid_min;
        self.valid_max = valid_max;
        self
    }

    /// Validate all parameters
    pub fn validate(&self) -> Result<()> {
        if self.trend_window_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "Trend window must be positive".to_string(),
            ));
        }
        if self.slope_label_days == Some(0) {
            return Err(ForecastError::InvalidParameter(
                "Slope label window must be positive".to_string(),
            ));
        }
        if !self.alert_threshold.is_finite() || self.alert_threshold <= 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Alert threshold must be a positive number, got {}",
                self.alert_threshold
            )));
        }
        if !(0.0..1.0).contains(&self.confidence_fraction) {
            return Err(ForecastError::InvalidParameter(format!(
                "Confidence fraction must be in [0, 1), got {}",
                self.confidence_fraction
            )));
        }
        if !self.valid_min.is_finite() || !self.valid_max.is_finite() {
            return Err(ForecastError::InvalidParameter(
                "Valid range bounds must be finite".to_string(),
            ));
        }
        if self.valid_min < 0.0 || self.valid_min > self.valid_max {
            return Err(ForecastError::InvalidParameter(format!(
                "Valid range [{}, {}] must satisfy 0 <= min <= max",
                self.valid_min, self.valid_max
            )));
        }
        Ok(())
    }

    /// Build a configuration from `FORECAST_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            horizon_days: parse_var(&lookup, "FORECAST_HORIZON_DAYS")?
                .unwrap_or(defaults.horizon_days),
            trend_window_days: parse_var(&lookup, "FORECAST_TREND_WINDOW_DAYS")?
                .unwrap_or(defaults.trend_window_days),
            slope_label_days: parse_var(&lookup, "FORECAST_SLOPE_LABEL_DAYS")?,
            alert_threshold: parse_var(&lookup, "FORECAST_ALERT_THRESHOLD")?
                .unwrap_or(defaults.alert_threshold),
            confidence_fraction: parse_var(&lookup, "FORECAST_CONFIDENCE_FRACTION")?
                .unwrap_or(defaults.confidence_fraction),
            valid_min: parse_var(&lookup, "FORECAST_VALID_MIN")?.unwrap_or(defaults.valid_min),
            valid_max: parse_var(&lookup, "FORECAST_VALID_MAX")?.unwrap_or(defaults.valid_max),
            rate_unit: defaults.rate_unit,
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            ForecastError::InvalidParameter(format!("{} has invalid value '{}': {}", key, raw, e))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_is_valid() {
        assert!(ForecastConfig::default().validate().is_ok());
        assert_eq!(ForecastConfig::dashboard().slope_label_days, Some(7));
        assert_eq!(ForecastConfig::default().slope_label_days, None);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("FORECAST_HORIZON_DAYS", "14"),
            ("FORECAST_ALERT_THRESHOLD", " 40.5 "),
            ("FORECAST_SLOPE_LABEL_DAYS", ""),
        ]
        .into_iter()
        .collect();
        let config =
            ForecastConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.horizon_days, 14);
        assert_eq!(config.alert_threshold, 40.5);
        assert_eq!(config.slope_label_days, None);
        assert_eq!(config.trend_window_days, DEFAULT_TREND_WINDOW_DAYS);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let result = ForecastConfig::from_lookup(|key| {
            (key == "FORECAST_HORIZON_DAYS").then(|| "seven".to_string())
        });
        assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
    }
}
