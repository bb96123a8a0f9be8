//! # Trend Forecast
//!
//! Short-horizon projection of daily mismatch counts for the reconciliation
//! dashboard.
//!
//! ## Features
//!
//! - Endpoint slope over a trailing trend window
//! - Threshold-approach slope nudge (presentation heuristic)
//! - Noisy linear projection clamped to a valid range, with a symmetric confidence band
//! - Alert threshold crossing detection and a display slope label
//!
//! Randomness is always injected, so a seeded generator reproduces a run exactly.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use trend_forecast::{DailyObservation, ForecastConfig, TrendForecaster};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let history: Vec<DailyObservation> = (0..10u32)
//!     .map(|i| DailyObservation::new(start + chrono::Days::new(i as u64), 30 + i))
//!     .collect();
//!
//! let forecaster = TrendForecaster::new(ForecastConfig::dashboard()).unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! let report = forecaster.forecast(&history, &mut rng).unwrap();
//!
//! assert_eq!(report.forecast.len(), 7);
//! assert!(report.forecast.iter().all(|p| p.lower_bound <= p.mean && p.mean <= p.upper_bound));
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod forecaster;
pub mod trend;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::data::{DailyObservation, ForecastPoint};
pub use crate::error::{ForecastError, Result};
pub use crate::forecaster::{ForecastReport, ThresholdCrossing, TrendForecaster};
pub use crate::trend::{NudgeBand, NudgedSlope, SlopeNudge};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
