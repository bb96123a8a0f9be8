//! Seeded synthetic histories for demos and tests

use crate::error::{FeedError, Result};
use crate::HistoryProvider;
use chrono::{Days, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::instrument;
use trend_forecast::DailyObservation;

/// Days of history the dashboard generates by default
pub const DEFAULT_HISTORY_DAYS: usize = 30;

/// Flows shown on the evolution page
pub const FLOWS: [&str; 8] = [
    "Flow A", "Flow B", "Flow C", "Flow D", "Flow E", "Flow F", "Flow G", "Flow H",
];

/// Days covered by the evolution page
pub const EVOLUTION_DAYS: usize = 120;

/// Exclusive upper bound of per-flow daily counts on the evolution page
pub const EVOLUTION_MAX_COUNT: u32 = 200;

/// Dates of `days` consecutive days ending on `end`
fn trailing_dates(end: NaiveDate, days: usize) -> Result<Vec<NaiveDate>> {
    (0..days)
        .rev()
        .map(|back| {
            end.checked_sub_days(Days::new(back as u64)).ok_or_else(|| {
                FeedError::InvalidParameter(format!("{} days before {} is out of range", back, end))
            })
        })
        .collect()
}

/// Dates of `days` consecutive days starting on `start`
fn leading_dates(start: NaiveDate, days: usize) -> Result<Vec<NaiveDate>> {
    (0..days)
        .map(|ahead| {
            start.checked_add_days(Days::new(ahead as u64)).ok_or_else(|| {
                FeedError::InvalidParameter(format!("{} days after {} is out of range", ahead, start))
            })
        })
        .collect()
}

fn check_bounds(days: usize, max_exclusive: u32) -> Result<()> {
    if days == 0 {
        return Err(FeedError::InvalidParameter(
            "History length must be positive".to_string(),
        ));
    }
    if max_exclusive == 0 {
        return Err(FeedError::InvalidParameter(
            "Upper bound must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Mismatch counts following a sine wave plus uniform jitter:
/// `round(base + amplitude * sin(i / period) + U[0, 1) * jitter)`.
#[derive(Debug, Clone)]
pub struct SinusoidalHistory {
    days: usize,
    end: NaiveDate,
    seed: u64,
    base: f64,
    amplitude: f64,
    period: f64,
    jitter: f64,
}

impl SinusoidalHistory {
    /// Create a generator of `days` observations ending on `end`
    pub fn new(days: usize, end: NaiveDate, seed: u64) -> Result<Self> {
        if days == 0 {
            return Err(FeedError::InvalidParameter(
                "History length must be positive".to_string(),
            ));
        }

        Ok(Self {
            days,
            end,
            seed,
            base: 20.0,
            amplitude: 10.0,
            period: 5.0,
            jitter: 5.0,
        })
    }

    /// `days` observations ending today
    pub fn ending_today(days: usize, seed: u64) -> Result<Self> {
        Self::new(days, Utc::now().date_naive(), seed)
    }

    /// Override the wave shape
    pub fn with_shape(mut self, base: f64, amplitude: f64, period: f64) -> Result<Self> {
        if period <= 0.0 || !period.is_finite() {
            return Err(FeedError::InvalidParameter(
                "Period must be a positive number".to_string(),
            ));
        }
        self.base = base;
        self.amplitude = amplitude;
        self.period = period;
        Ok(self)
    }
}

impl HistoryProvider for SinusoidalHistory {
    fn name(&self) -> &str {
        "sinusoidal"
    }

    #[instrument(skip(self), fields(days = self.days, seed = self.seed))]
    fn fetch_recent_history(&self) -> Result<Vec<DailyObservation>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let dates = trailing_dates(self.end, self.days)?;

        Ok(dates
            .into_iter()
            .enumerate()
            .map(|(i, date)| {
                let wave = self.amplitude * (i as f64 / self.period).sin();
                let value = self.base + wave + rng.gen::<f64>() * self.jitter;
                DailyObservation::new(date, value.round().max(0.0) as u32)
            })
            .collect())
    }
}

/// Incident timeline counts drawn uniformly from `0..max_exclusive`
#[derive(Debug, Clone)]
pub struct UniformHistory {
    days: usize,
    end: NaiveDate,
    seed: u64,
    max_exclusive: u32,
}

impl UniformHistory {
    /// Create a generator of `days` observations ending on `end`
    pub fn new(days: usize, end: NaiveDate, seed: u64, max_exclusive: u32) -> Result<Self> {
        check_bounds(days, max_exclusive)?;

        Ok(Self {
            days,
            end,
            seed,
            max_exclusive,
        })
    }

    /// Incident timeline: `days` observations ending today, counts in `0..5`
    pub fn incident_timeline(days: usize, seed: u64) -> Result<Self> {
        Self::new(days, Utc::now().date_naive(), seed, 5)
    }
}

impl HistoryProvider for UniformHistory {
    fn name(&self) -> &str {
        "uniform"
    }

    #[instrument(skip(self), fields(days = self.days, seed = self.seed))]
    fn fetch_recent_history(&self) -> Result<Vec<DailyObservation>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let dates = trailing_dates(self.end, self.days)?;

        Ok(dates
            .into_iter()
            .map(|date| DailyObservation::new(date, rng.gen_range(0..self.max_exclusive)))
            .collect())
    }
}

/// Per-flow daily counts drawn uniformly from `0..max_exclusive`, on
/// consecutive days from a fixed start date
#[derive(Debug, Clone)]
pub struct FlowHistory {
    flow: String,
    start: NaiveDate,
    days: usize,
    seed: u64,
    max_exclusive: u32,
}

impl FlowHistory {
    /// Create a generator of `days` observations for `flow` starting on `start`
    pub fn new(
        flow: impl Into<String>,
        start: NaiveDate,
        days: usize,
        seed: u64,
        max_exclusive: u32,
    ) -> Result<Self> {
        let flow = flow.into();
        if flow.trim().is_empty() {
            return Err(FeedError::InvalidParameter(
                "Flow name must not be empty".to_string(),
            ));
        }
        check_bounds(days, max_exclusive)?;

        Ok(Self {
            flow,
            start,
            days,
            seed,
            max_exclusive,
        })
    }

    /// Evolution page default: 120 days from 2023-08-01, counts in `0..200`
    pub fn evolution(flow: impl Into<String>, seed: u64) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(2023, 8, 1).ok_or_else(|| {
            FeedError::InvalidParameter("Invalid evolution start date".to_string())
        })?;
        Self::new(flow, start, EVOLUTION_DAYS, seed, EVOLUTION_MAX_COUNT)
    }

    /// One evolution provider per dashboard flow, each with its own seed
    pub fn evolution_flows(seed: u64) -> Result<Vec<Self>> {
        FLOWS
            .iter()
            .enumerate()
            .map(|(i, flow)| Self::evolution(*flow, seed.wrapping_add(i as u64)))
            .collect()
    }
}

impl HistoryProvider for FlowHistory {
    fn name(&self) -> &str {
        &self.flow
    }

    #[instrument(skip(self), fields(flow = %self.flow, days = self.days, seed = self.seed))]
    fn fetch_recent_history(&self) -> Result<Vec<DailyObservation>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let dates = leading_dates(self.start, self.days)?;

        Ok(dates
            .into_iter()
            .map(|date| DailyObservation::new(date, rng.gen_range(0..self.max_exclusive)))
            .collect())
    }
}
