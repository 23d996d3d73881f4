//! Piecewise-linear trend math.

use crate::config::TrendConfig;
use crate::generator::GeneratorError;
use chrono::{DateTime, Duration, Utc};

/// Upper bound for any emitted value.
pub const MAX_PCT: f64 = 1.0;

/// Timing and slopes derived from a validated `TrendConfig` and an end anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPlan {
    /// Timestamp of point 0.
    pub start_time: DateTime<Utc>,
    /// End anchor of the series window (`start_time + point_count * interval`).
    pub end_time: DateTime<Utc>,
    /// Index where the second slope takes over.
    pub change_index: u32,
    /// Timestamp of the point at `change_index`.
    pub change_point_time: DateTime<Utc>,
    /// Per-step increment before the change point.
    pub slope_1: f64,
    /// Per-step increment from the change point on.
    pub slope_2: f64,
    /// Spacing between points.
    pub interval: Duration,
    start_pct: f64,
    mid_pct: f64,
}

impl TrendPlan {
    /// Build the plan for a series ending at `now`.
    ///
    /// The config must already be validated; both segments are non-empty so
    /// neither slope divides by zero. Fails if the first timestamp would fall
    /// before the earliest representable date.
    pub(crate) fn new(config: &TrendConfig, now: DateTime<Utc>) -> Result<Self, GeneratorError> {
        let change_index = config.change_index();
        let start_time = config
            .interval
            .checked_mul(config.point_count as i32)
            .and_then(|span| now.checked_sub_signed(span))
            .ok_or_else(|| {
                GeneratorError::InvalidConfig(format!(
                    "{} points at {}s intervals cannot end at {now}",
                    config.point_count,
                    config.interval.num_seconds()
                ))
            })?;
        let change_point_time = start_time + config.interval * change_index as i32;

        let slope_1 = (config.mid_pct - config.start_pct) / change_index as f64;
        let slope_2 =
            (config.end_pct - config.mid_pct) / (config.point_count - change_index) as f64;

        Ok(Self {
            start_time,
            end_time: now,
            change_index,
            change_point_time,
            slope_1,
            slope_2,
            interval: config.interval,
            start_pct: config.start_pct,
            mid_pct: config.mid_pct,
        })
    }

    /// Noiseless trend value at `index`.
    pub fn base_value(&self, index: u32) -> f64 {
        if index < self.change_index {
            self.start_pct + self.slope_1 * index as f64
        } else {
            self.mid_pct + self.slope_2 * (index - self.change_index) as f64
        }
    }

    /// Timestamp of the point at `index`.
    pub fn timestamp(&self, index: u32) -> DateTime<Utc> {
        self.start_time + self.interval * index as i32
    }

    /// Initial value of the monotonic floor accumulator.
    pub fn initial_floor(&self) -> f64 {
        self.start_pct
    }
}

/// Advance the monotonic floor: never below `previous`, never above 100%.
pub fn apply_floor_and_cap(previous: f64, candidate: f64) -> f64 {
    previous.max(candidate).min(MAX_PCT)
}

/// Round a usage fraction to 4 decimal places.
pub fn round_pct(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
