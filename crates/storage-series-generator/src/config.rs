//! Trend configuration and validation.

use crate::generator::GeneratorError;
use crate::trend::TrendPlan;
use chrono::{DateTime, Duration, Utc};

/// Number of points generated per run.
pub const DEFAULT_POINT_COUNT: u32 = 1000;
/// Fraction of the series after which the second slope applies.
pub const DEFAULT_CHANGE_RATIO: f64 = 0.6;
/// Usage at the first point.
pub const DEFAULT_START_PCT: f64 = 0.30;
/// Usage at the change point.
pub const DEFAULT_MID_PCT: f64 = 0.45;
/// Usage approached at the last point.
pub const DEFAULT_END_PCT: f64 = 0.85;
/// Half-width of the uniform noise band (±0.5 percentage points).
pub const DEFAULT_NOISE_AMPLITUDE: f64 = 0.005;
/// Host label attached to every point.
pub const DEFAULT_HOST_NAME: &str = "synthetic-server-01";

/// Shape of the synthetic series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendConfig {
    /// Number of points to emit.
    pub point_count: u32,
    /// Position of the change point as a fraction of `point_count`.
    pub change_ratio: f64,
    /// Usage fraction at index 0.
    pub start_pct: f64,
    /// Usage fraction at the change point.
    pub mid_pct: f64,
    /// Usage fraction approached at the end of the series.
    pub end_pct: f64,
    /// Spacing between consecutive timestamps.
    pub interval: Duration,
    /// Noise is drawn uniformly from `[-noise_amplitude, noise_amplitude]`.
    pub noise_amplitude: f64,
    /// Host label attached to every point.
    pub host_name: String,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            change_ratio: DEFAULT_CHANGE_RATIO,
            start_pct: DEFAULT_START_PCT,
            mid_pct: DEFAULT_MID_PCT,
            end_pct: DEFAULT_END_PCT,
            interval: Duration::hours(1),
            noise_amplitude: DEFAULT_NOISE_AMPLITUDE,
            host_name: DEFAULT_HOST_NAME.to_string(),
        }
    }
}

impl TrendConfig {
    /// Set the number of points.
    pub fn with_point_count(mut self, point_count: u32) -> Self {
        self.point_count = point_count;
        self
    }

    /// Set the change point ratio.
    pub fn with_change_ratio(mut self, change_ratio: f64) -> Self {
        self.change_ratio = change_ratio;
        self
    }

    /// Set the start, mid and end usage fractions.
    pub fn with_levels(mut self, start_pct: f64, mid_pct: f64, end_pct: f64) -> Self {
        self.start_pct = start_pct;
        self.mid_pct = mid_pct;
        self.end_pct = end_pct;
        self
    }

    /// Set the spacing between points.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the noise half-width. Zero disables noise.
    pub fn with_noise_amplitude(mut self, noise_amplitude: f64) -> Self {
        self.noise_amplitude = noise_amplitude;
        self
    }

    /// Index at which the second slope takes over.
    pub fn change_index(&self) -> u32 {
        (self.point_count as f64 * self.change_ratio).floor() as u32
    }

    /// Timing and slopes for a series ending at `now`.
    ///
    /// Validates the configuration first, then fails if the series would
    /// start before the earliest representable date.
    pub fn plan(&self, now: DateTime<Utc>) -> Result<TrendPlan, GeneratorError> {
        self.validate()?;
        TrendPlan::new(self, now)
    }

    /// Reject configurations that would make either slope undefined or push
    /// values outside `[0.0, 1.0]`.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.point_count == 0 {
            return Err(invalid("point_count must be greater than zero"));
        }
        if i32::try_from(self.point_count).is_err() {
            return Err(invalid(format!(
                "point_count {} exceeds {}",
                self.point_count,
                i32::MAX
            )));
        }
        if !(self.change_ratio > 0.0 && self.change_ratio < 1.0) {
            return Err(invalid(format!(
                "change_ratio must be strictly between 0 and 1, got {}",
                self.change_ratio
            )));
        }

        let change_index = self.change_index();
        if change_index == 0 || change_index >= self.point_count {
            return Err(invalid(format!(
                "change_ratio {} puts the change point at index {} of {}; \
                 both segments need at least one point",
                self.change_ratio, change_index, self.point_count
            )));
        }

        for (name, pct) in [
            ("start_pct", self.start_pct),
            ("mid_pct", self.mid_pct),
            ("end_pct", self.end_pct),
        ] {
            if !pct.is_finite() || !(0.0..=1.0).contains(&pct) {
                return Err(invalid(format!(
                    "{name} must be within [0.0, 1.0], got {pct}"
                )));
            }
        }

        if !self.noise_amplitude.is_finite() || self.noise_amplitude < 0.0 {
            return Err(invalid(format!(
                "noise_amplitude must be a non-negative number, got {}",
                self.noise_amplitude
            )));
        }

        if self.interval <= Duration::zero() {
            return Err(invalid("interval must be positive"));
        }
        // The full span must fit in a chrono Duration.
        if self.interval.checked_mul(self.point_count as i32).is_none() {
            return Err(invalid("point_count * interval overflows"));
        }

        if self.host_name.trim().is_empty() {
            return Err(invalid("host_name must not be empty"));
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> GeneratorError {
    GeneratorError::InvalidConfig(msg.into())
}
