//! Noise sources
//!
//! The torque curve and the RPM jitter step both draw random samples. They go
//! through [`NoiseSource`] so callers can swap the generator for a seeded or
//! constant one.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

/// Produces uniform samples in `[0, 1)`
pub trait NoiseSource {
    /// Next sample in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Next sample shifted to `[-0.5, 0.5)`
    fn centered(&mut self) -> f64 {
        self.next_unit() - 0.5
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Pseudo-random noise backed by [`StdRng`]
#[derive(Debug, Clone)]
pub struct RandomNoise {
    rng: StdRng,
}

impl RandomNoise {
    /// Seed from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomNoise {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl NoiseSource for RandomNoise {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Always returns the same sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise(f64);

impl FixedNoise {
    /// Constant sample, clamped into `[0, 1)`
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0 - f64::EPSILON))
    }

    /// Sample of 0.5, so every centered draw is exactly zero
    pub fn centered() -> Self {
        Self(0.5)
    }
}

impl NoiseSource for FixedNoise {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}
