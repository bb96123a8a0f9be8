//! History loaded from a `date,count` CSV file

use crate::error::{FeedError, Result};
use crate::HistoryProvider;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use trend_forecast::DailyObservation;

/// Reads observations from a CSV file with a `date,count` header.
///
/// Rows may appear in any order; they are returned sorted by date.
/// Duplicate dates are rejected.
#[derive(Debug, Clone)]
pub struct CsvHistory {
    path: PathBuf,
}

impl CsvHistory {
    /// Create a provider for the given file
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryProvider for CsvHistory {
    fn name(&self) -> &str {
        "csv"
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn fetch_recent_history(&self) -> Result<Vec<DailyObservation>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let mut history = reader
            .deserialize::<DailyObservation>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if history.is_empty() {
            return Err(FeedError::Empty(format!(
                "No observations in {}",
                self.path.display()
            )));
        }

        history.sort_by_key(|obs| obs.date);
        if let Some(pair) = history.windows(2).find(|pair| pair[0].date == pair[1].date) {
            return Err(FeedError::InvalidRecord(format!(
                "Duplicate date {} in {}",
                pair[0].date,
                self.path.display()
            )));
        }

        debug!(rows = history.len(), "loaded history");
        Ok(history)
    }
}
