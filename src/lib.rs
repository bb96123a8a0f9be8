//! # Recon Watch
//!
//! Forecast panel of the price reconciliation dashboard. A panel pairs a
//! [`HistoryProvider`] with a [`TrendForecaster`] and yields either a ready
//! report or a neutral "forecast unavailable" state.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use recon_watch::{ForecastPanel, PanelState};
//! use recon_watch::feed::SinusoidalHistory;
//! use recon_watch::forecast::{ForecastConfig, TrendForecaster};
//!
//! let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
//! let provider = SinusoidalHistory::new(30, end, 1).unwrap();
//! let forecaster = TrendForecaster::new(ForecastConfig::dashboard()).unwrap();
//! let panel = ForecastPanel::new(provider, forecaster);
//!
//! match panel.refresh(&mut StdRng::seed_from_u64(1)) {
//!     PanelState::Ready(report) => assert_eq!(report.forecast.len(), 7),
//!     PanelState::Unavailable { reason } => panic!("{}", reason),
//! }
//! ```

pub mod settings;

pub use mismatch_feed as feed;
pub use trend_forecast as forecast;

use mismatch_feed::{FeedError, HistoryProvider};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};
use trend_forecast::{ForecastError, ForecastReport, TrendForecaster};

/// Errors surfaced by the dashboard layer
#[derive(Debug, Error)]
pub enum DashboardError {
    /// History could not be fetched
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// Forecast could not be computed
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    /// Invalid runtime configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, DashboardError>;

/// What the forecast widget should display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelState {
    /// A complete forecast
    Ready(ForecastReport),
    /// Neutral placeholder; no partial forecast is shown
    Unavailable {
        /// Why the forecast could not be produced
        reason: String,
    },
}

impl PanelState {
    /// The report, when ready
    pub fn report(&self) -> Option<&ForecastReport> {
        match self {
            PanelState::Ready(report) => Some(report),
            PanelState::Unavailable { .. } => None,
        }
    }

    /// Whether the panel has a forecast to show
    pub fn is_ready(&self) -> bool {
        matches!(self, PanelState::Ready(_))
    }
}

/// One dashboard forecast widget: a history source and a forecaster
#[derive(Debug, Clone)]
pub struct ForecastPanel<P> {
    provider: P,
    forecaster: TrendForecaster,
}

impl<P: HistoryProvider> ForecastPanel<P> {
    /// Create a panel
    pub fn new(provider: P, forecaster: TrendForecaster) -> Self {
        Self {
            provider,
            forecaster,
        }
    }

    /// History source
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Forecaster in use
    pub fn forecaster(&self) -> &TrendForecaster {
        &self.forecaster
    }

    /// Fetch history and forecast it, propagating failures
    pub fn compute<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ForecastReport> {
        let history = self.provider.fetch_recent_history()?;
        let report = self.forecaster.forecast(&history, rng)?;
        if report.is_truncated() {
            return Err(DashboardError::Forecast(ForecastError::InsufficientData(
                format!(
                    "Forecast has {} of {} requested days",
                    report.forecast.len(),
                    report.requested_horizon
                ),
            )));
        }
        Ok(report)
    }

    /// Recompute the panel; failures become [`PanelState::Unavailable`]
    #[instrument(skip(self, rng), fields(provider = self.provider.name()))]
    pub fn refresh<R: Rng + ?Sized>(&self, rng: &mut R) -> PanelState {
        match self.compute(rng) {
            Ok(report) => {
                info!(crossing = %report.crossing, slope = %report.slope_label, "forecast ready");
                PanelState::Ready(report)
            }
            Err(err) => {
                warn!(error = %err, "forecast unavailable");
                PanelState::Unavailable {
                    reason: err.to_string(),
                }
            }
        }
    }
}
