//! Slope estimation and the threshold-approach nudge

use crate::data::{trailing_window, DailyObservation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Endpoint-to-endpoint rate of change per day.
///
/// Returns 0 when fewer than two observations are given.
pub fn endpoint_slope(window: &[DailyObservation]) -> f64 {
    match (window.first(), window.last()) {
        (Some(first), Some(last)) if window.len() > 1 => {
            (f64::from(last.count) - f64::from(first.count)) / (window.len() - 1) as f64
        }
        _ => 0.0,
    }
}

/// Unnudged slope over the trailing `days`, or `None` when history is shorter
pub fn observed_slope(history: &[DailyObservation], days: usize) -> Option<f64> {
    if history.len() < days {
        return None;
    }
    Some(endpoint_slope(trailing_window(history, days)))
}

/// Human readable per-day rate, e.g. `+1.25 mismatches/day`
pub fn format_slope(slope: Option<f64>, unit: &str) -> String {
    match slope {
        Some(value) if value > 0.0 => format!("+{:.2} {}", value, unit),
        Some(value) => format!("{:.2} {}", value, unit),
        None => "N/A".to_string(),
    }
}

/// Which band of the nudge policy the last observation fell into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgeBand {
    /// Below the mid-range band, slope untouched
    Below,
    /// In `[0.60, 0.75)` of the threshold
    MidRange,
    /// At or above `0.75` of the threshold
    Approaching,
}

/// Result of applying the nudge policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NudgedSlope {
    /// Slope used for projection
    pub slope: f64,
    /// Band the last observation fell into
    pub band: NudgeBand,
    /// Whether the slope was replaced
    pub nudged: bool,
}

/// Presentation heuristic that bends the slope upward as the last observed
/// count approaches the alert threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeNudge {
    approaching_ratio: f64,
    mid_range_ratio: f64,
    mid_range_probability: f64,
}

impl Default for SlopeNudge {
    fn default() -> Self {
        Self {
            approaching_ratio: 0.75,
            mid_range_ratio: 0.60,
            mid_range_probability: 0.7,
        }
    }
}

impl SlopeNudge {
    /// Slope floor and span in the approaching band: result in `[0.5, 1.0)`
    const APPROACHING_FLOOR: f64 = 0.5;
    const APPROACHING_SPAN: f64 = 0.5;
    /// Slope floor and span in the mid-range band: result in `[0.2, 0.5)`
    const MID_RANGE_FLOOR: f64 = 0.2;
    const MID_RANGE_SPAN: f64 = 0.3;

    /// Classify the last observed count against the threshold
    pub fn band(&self, last_count: f64, threshold: f64) -> NudgeBand {
        if last_count >= threshold * self.approaching_ratio {
            NudgeBand::Approaching
        } else if last_count >= threshold * self.mid_range_ratio {
            NudgeBand::MidRange
        } else {
            NudgeBand::Below
        }
    }

    /// Apply the policy once.
    ///
    /// Random draws happen in a fixed order (gate, then slope) so seeded runs
    /// are reproducible.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        base_slope: f64,
        last_count: f64,
        threshold: f64,
        rng: &mut R,
    ) -> NudgedSlope {
        let band = self.band(last_count, threshold);
        let replacement = match band {
            NudgeBand::Approaching if base_slope < Self::APPROACHING_FLOOR => Some(
                Self::APPROACHING_FLOOR + rng.gen::<f64>() * Self::APPROACHING_SPAN,
            ),
            NudgeBand::MidRange => {
                let gate_open = rng.gen::<f64>() < self.mid_range_probability;
                if gate_open && base_slope < Self::MID_RANGE_FLOOR {
                    Some(Self::MID_RANGE_FLOOR + rng.gen::<f64>() * Self::MID_RANGE_SPAN)
                } else {
                    None
                }
            }
            _ => None,
        };

        let nudged = NudgedSlope {
            slope: replacement.unwrap_or(base_slope),
            band,
            nudged: replacement.is_some(),
        };
        debug!(base_slope, applied = nudged.slope, ?band, "slope nudge evaluated");
        nudged
    }
}
