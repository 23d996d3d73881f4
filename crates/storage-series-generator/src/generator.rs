//! Series generator producing lazily evaluated data points.

use crate::config::TrendConfig;
use crate::point::DataPoint;
use crate::trend::{apply_floor_and_cap, round_pct, TrendPlan};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Configuration cannot produce a well-defined series
    #[error("Invalid trend configuration: {0}")]
    InvalidConfig(String),
}

/// Generator for one synthetic disk-usage series.
///
/// The noise source is any `Rng`; seeding it makes the series reproducible
/// for a fixed end anchor.
pub struct SeriesGenerator<R = StdRng> {
    config: TrendConfig,
    rng: R,
}

impl SeriesGenerator<StdRng> {
    /// Create a generator with a seeded RNG.
    pub fn with_seed(config: TrendConfig, seed: u64) -> Result<Self, GeneratorError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Create a generator seeded from OS entropy.
    pub fn from_entropy(config: TrendConfig) -> Result<Self, GeneratorError> {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> SeriesGenerator<R> {
    /// Create a generator, validating the configuration.
    pub fn new(config: TrendConfig, rng: R) -> Result<Self, GeneratorError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Compute the timing and slopes for a series ending at `now`.
    pub fn plan(&self, now: DateTime<Utc>) -> Result<TrendPlan, GeneratorError> {
        TrendPlan::new(&self.config, now)
    }

    /// Consume the generator and return the points of a series ending at `now`.
    ///
    /// The iterator is lazy and cannot be restarted.
    pub fn points(self, now: DateTime<Utc>) -> Result<SeriesIter<R>, GeneratorError> {
        let plan = self.plan(now)?;
        let floor = plan.initial_floor();
        debug!(
            "Generating {} points from {} (change point at index {}, slopes {:.6}/{:.6})",
            self.config.point_count, plan.start_time, plan.change_index, plan.slope_1, plan.slope_2
        );
        Ok(SeriesIter {
            plan,
            rng: self.rng,
            noise_amplitude: self.config.noise_amplitude,
            host_name: self.config.host_name,
            point_count: self.config.point_count,
            index: 0,
            floor,
        })
    }
}

/// Iterator that lazily generates data points.
pub struct SeriesIter<R = StdRng> {
    plan: TrendPlan,
    rng: R,
    noise_amplitude: f64,
    host_name: String,
    point_count: u32,
    index: u32,
    /// Last unrounded value emitted; the floor for the next one.
    floor: f64,
}

impl<R: Rng> SeriesIter<R> {
    /// The plan this iterator follows.
    pub fn plan(&self) -> &TrendPlan {
        &self.plan
    }

    fn noise(&mut self) -> f64 {
        if self.noise_amplitude == 0.0 {
            0.0
        } else {
            self.rng
                .gen_range(-self.noise_amplitude..=self.noise_amplitude)
        }
    }
}

impl<R: Rng> Iterator for SeriesIter<R> {
    type Item = DataPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.point_count {
            return None;
        }

        let index = self.index;
        let candidate = self.plan.base_value(index) + self.noise();
        self.floor = apply_floor_and_cap(self.floor, candidate);
        self.index += 1;

        Some(DataPoint {
            index,
            timestamp: self.plan.timestamp(index),
            value: round_pct(self.floor),
            host_name: self.host_name.clone(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.point_count - self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for SeriesIter<R> {}
