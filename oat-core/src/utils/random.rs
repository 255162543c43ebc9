#[cfg(test)]
#[path = "../../tests/unit/utils/random_test.rs"]
mod random_test;

use crate::utils::Float;
use rand::prelude::*;
use rand_distr::Normal;
use std::sync::Mutex;

/// Provides the way to use randomized values in generic way.
pub trait Random: Send + Sync {
    /// Produces integral random value, uniformly distributed on the closed interval [min, max]
    fn uniform_int(&self, min: i32, max: i32) -> i32;

    /// Produces real random value, uniformly distributed on the interval [min, max)
    fn uniform_real(&self, min: Float, max: Float) -> Float;

    /// Produces real random value from normal distribution.
    fn normal(&self, mean: Float, std_dev: Float) -> Float;

    /// Flips a coin and returns true if it is "heads", false otherwise.
    fn is_head_not_tails(&self) -> bool;

    /// Tests probability value in (0., 1.) range.
    fn is_hit(&self, probability: Float) -> bool;

    /// Returns an index from collected with probability weight.
    /// Uses exponential distribution where the weights are the rate of the distribution (lambda)
    /// and selects the smallest sampled value.
    fn weighted(&self, weights: &[usize]) -> usize;

    /// Returns a random permutation of `[0, size)` indices.
    fn permutation(&self, size: usize) -> Vec<usize>;
}

/// A default random implementation backed by explicitly seeded small RNG.
///
/// Every run owns its own instance, so runs with the same seed are repeatable and
/// runs on different threads never share generator state.
pub struct DefaultRandom {
    rng: Mutex<SmallRng>,
}

impl DefaultRandom {
    /// Creates a new instance of `DefaultRandom` seeded with given value.
    pub fn new_repeatable(seed: u64) -> Self {
        Self { rng: Mutex::new(SmallRng::seed_from_u64(seed)) }
    }

    fn with_rng<R>(&self, action: impl FnOnce(&mut SmallRng) -> R) -> R {
        // NOTE a poisoned lock still holds a valid generator state
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        action(&mut *rng)
    }
}

impl Default for DefaultRandom {
    fn default() -> Self {
        Self::new_repeatable(generate_seed())
    }
}

/// Generates a seed from the thread local entropy source.
pub fn generate_seed() -> u64 {
    thread_rng().next_u64()
}

impl Random for DefaultRandom {
    fn uniform_int(&self, min: i32, max: i32) -> i32 {
        if min == max {
            return min;
        }

        assert!(min < max);
        self.with_rng(|rng| rng.gen_range(min..max + 1))
    }

    fn uniform_real(&self, min: Float, max: Float) -> Float {
        if (min - max).abs() < Float::EPSILON {
            return min;
        }

        assert!(min < max);
        self.with_rng(|rng| rng.gen_range(min..max))
    }

    fn normal(&self, mean: Float, std_dev: Float) -> Float {
        if std_dev < 0. || !std_dev.is_finite() {
            return mean;
        }

        match Normal::new(mean, std_dev) {
            Ok(normal) => self.with_rng(|rng| normal.sample(rng)),
            Err(_) => mean,
        }
    }

    fn is_head_not_tails(&self) -> bool {
        self.with_rng(|rng| rng.gen_bool(0.5))
    }

    fn is_hit(&self, probability: Float) -> bool {
        self.with_rng(|rng| rng.gen_bool(probability.clamp(0., 1.)))
    }

    fn weighted(&self, weights: &[usize]) -> usize {
        weights
            .iter()
            .zip(0_usize..)
            .map(|(&weight, index)| (-self.uniform_real(0., 1.).ln() / weight as Float, index))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map_or(0, |(_, index)| index)
    }

    fn permutation(&self, size: usize) -> Vec<usize> {
        let mut indices = (0..size).collect::<Vec<_>>();
        self.with_rng(|rng| indices.shuffle(rng));

        indices
    }
}
