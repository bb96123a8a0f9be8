//! Trend forecaster: endpoint slope, nudge, noisy projection, confidence band

use crate::config::ForecastConfig;
use crate::data::{future_dates, trailing_window, validate_history, DailyObservation, ForecastPoint};
use crate::error::{ForecastError, Result};
use crate::trend::{endpoint_slope, format_slope, observed_slope, NudgedSlope, SlopeNudge};
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// First projected day reaching the alert threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdCrossing {
    /// The threshold is reached on this day
    Projected(NaiveDate),
    /// No day within the horizon reaches the threshold
    NotProjected,
}

impl ThresholdCrossing {
    /// The crossing date, if any
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ThresholdCrossing::Projected(date) => Some(*date),
            ThresholdCrossing::NotProjected => None,
        }
    }

    /// Whether a crossing was projected
    pub fn is_projected(&self) -> bool {
        matches!(self, ThresholdCrossing::Projected(_))
    }
}

impl fmt::Display for ThresholdCrossing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdCrossing::Projected(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            ThresholdCrossing::NotProjected => write!(f, "not projected"),
        }
    }
}

/// Output of one forecast run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    /// Projected days, one per day of the horizon
    pub forecast: Vec<ForecastPoint>,
    /// Display label for the unnudged trailing slope
    pub slope_label: String,
    /// Unnudged trailing slope behind the label, `None` when history is shorter
    /// than an explicit label window
    pub observed_slope: Option<f64>,
    /// Slope actually used for projection, after nudging
    pub applied_slope: NudgedSlope,
    /// First day reaching the alert threshold
    pub crossing: ThresholdCrossing,
    /// Horizon that was asked for
    pub requested_horizon: usize,
}

impl ForecastReport {
    /// First crossing date, if any
    pub fn crossing_date(&self) -> Option<NaiveDate> {
        self.crossing.date()
    }

    /// Whether fewer points were produced than requested
    pub fn is_truncated(&self) -> bool {
        self.forecast.len() < self.requested_horizon
    }

    /// Serialize the report to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Projects daily mismatch counts from recent history
#[derive(Debug, Clone)]
pub struct TrendForecaster {
    config: ForecastConfig,
    nudge: SlopeNudge,
}

impl TrendForecaster {
    /// Create a forecaster, validating its configuration
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            nudge: SlopeNudge::default(),
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Run the forecast over `history` drawing noise and nudges from `rng`.
    ///
    /// History must be non-empty with strictly increasing dates.
    #[instrument(
        skip(self, history, rng),
        fields(history_len = history.len(), horizon = self.config.horizon_days)
    )]
    pub fn forecast<R: Rng + ?Sized>(
        &self,
        history: &[DailyObservation],
        rng: &mut R,
    ) -> Result<ForecastReport> {
        let last = history.last().ok_or_else(|| {
            ForecastError::InsufficientData("History is empty".to_string())
        })?;
        validate_history(history)?;

        let config = &self.config;
        let last_count = f64::from(last.count);

        let base_slope = endpoint_slope(trailing_window(history, config.trend_window_days));
        let applied_slope = self
            .nudge
            .apply(base_slope, last_count, config.alert_threshold, rng);

        let forecast = future_dates(last.date, config.horizon_days)?
            .into_iter()
            .enumerate()
            .map(|(i, date)| {
                let step = (i + 1) as f64;
                let noise: f64 = rng.gen_range(-1.0..1.0);
                let mean = (last_count + step * applied_slope.slope + noise)
                    .clamp(config.valid_min, config.valid_max);
                self.point(date, mean)
            })
            .collect::<Vec<_>>();

        let crossing = forecast
            .iter()
            .find(|point| point.reaches(config.alert_threshold))
            .map_or(ThresholdCrossing::NotProjected, |point| {
                ThresholdCrossing::Projected(point.date)
            });

        // An explicit label window reports N/A on short history; otherwise the
        // label follows the trend window like the base slope does
        let observed = match config.slope_label_days {
            Some(days) => observed_slope(history, days),
            None => Some(base_slope),
        };
        debug!(
            base_slope,
            applied = applied_slope.slope,
            %crossing,
            "forecast computed"
        );

        Ok(ForecastReport {
            forecast,
            slope_label: format_slope(observed, &config.rate_unit),
            observed_slope: observed,
            applied_slope,
            crossing,
            requested_horizon: config.horizon_days,
        })
    }

    fn point(&self, date: NaiveDate, mean: f64) -> ForecastPoint {
        let margin = self.config.confidence_fraction;
        // mean is clamped to a non-negative range, so the casts cannot wrap
        ForecastPoint {
            date,
            mean: mean.round() as u32,
            upper_bound: (mean * (1.0 + margin)).round() as u32,
            lower_bound: (mean * (1.0 - margin)).round() as u32,
        }
    }
}
