//! # Mismatch Feed
//!
//! Sources of daily mismatch history for the trend forecaster. Every source is
//! an explicit value implementing [`HistoryProvider`]; nothing is cached
//! process-wide.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use mismatch_feed::{HistoryProvider, SinusoidalHistory};
//!
//! let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
//! let provider = SinusoidalHistory::new(30, end, 42).unwrap();
//! let history = provider.fetch_recent_history().unwrap();
//!
//! assert_eq!(history.len(), 30);
//! assert_eq!(history.last().unwrap().date, end);
//! ```

pub mod csv_feed;
pub mod error;
pub mod synthetic;

use trend_forecast::DailyObservation;

pub use crate::csv_feed::CsvHistory;
pub use crate::error::{FeedError, Result};
pub use crate::synthetic::{FlowHistory, SinusoidalHistory, UniformHistory};

/// Supplies the recent daily history a forecast is computed from
pub trait HistoryProvider {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Fetch recent history, ordered by date ascending
    fn fetch_recent_history(&self) -> Result<Vec<DailyObservation>>;
}

/// Fixed in-memory history
#[derive(Debug, Clone, Default)]
pub struct StaticHistory {
    observations: Vec<DailyObservation>,
}

impl StaticHistory {
    /// Wrap the given observations
    pub fn new(observations: Vec<DailyObservation>) -> Self {
        Self { observations }
    }
}

impl HistoryProvider for StaticHistory {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_recent_history(&self) -> Result<Vec<DailyObservation>> {
        Ok(self.observations.clone())
    }
}
