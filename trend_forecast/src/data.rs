//! Daily observation and forecast point types

use crate::error::{ForecastError, Result};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// One day of observed mismatch counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyObservation {
    /// Calendar day, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Number of mismatches seen that day
    pub count: u32,
}

impl DailyObservation {
    /// Create a new observation
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }
}

/// A projected day with its confidence band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// Calendar day being projected
    pub date: NaiveDate,
    /// Projected count, clamped and rounded
    pub mean: u32,
    /// Upper edge of the confidence band
    pub upper_bound: u32,
    /// Lower edge of the confidence band
    pub lower_bound: u32,
}

impl ForecastPoint {
    /// Whether this point reaches the given threshold
    pub fn reaches(&self, threshold: f64) -> bool {
        f64::from(self.mean) >= threshold
    }
}

/// Check that history dates are strictly increasing.
///
/// Gaps between days are allowed; duplicated or out-of-order dates are not.
pub fn validate_history(history: &[DailyObservation]) -> Result<()> {
    for pair in history.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(ForecastError::DataError(format!(
                "History dates must be strictly increasing: {} follows {}",
                pair[1].date, pair[0].date
            )));
        }
    }
    Ok(())
}

/// The trailing `days` observations, or the whole history when it is shorter
pub fn trailing_window(history: &[DailyObservation], days: usize) -> &[DailyObservation] {
    let start = history.len().saturating_sub(days);
    &history[start..]
}

/// Create the `horizon` calendar days following `last`, one day apart
pub fn future_dates(last: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    (1..=horizon)
        .map(|offset| {
            last.checked_add_days(Days::new(offset as u64)).ok_or_else(|| {
                ForecastError::DataError(format!(
                    "Date overflow projecting {} days after {}",
                    offset, last
                ))
            })
        })
        .collect()
}
