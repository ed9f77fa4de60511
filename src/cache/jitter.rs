//! Refresh Jitter Module
//!
//! Supplies the random fraction of a record's TTL below which a sweep
//! refreshes it. The source is injected into the engine so it can be fixed
//! in tests.

use std::fmt;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cache::{REFRESH_WINDOW_MAX, REFRESH_WINDOW_MIN};

// == Refresh Jitter ==
/// Source of refresh-window fractions, drawn once per evaluated entry.
pub trait RefreshJitter: Send + Sync + fmt::Debug {
    /// Returns the fraction of the TTL that forms the refresh window.
    fn refresh_factor(&mut self) -> f64;
}

// == Uniform Jitter ==
/// Draws fractions uniformly from `[REFRESH_WINDOW_MIN, REFRESH_WINDOW_MAX]`.
#[derive(Debug, Clone)]
pub struct UniformJitter {
    rng: StdRng,
    window: Uniform<f64>,
}

impl UniformJitter {
    /// Creates a jitter source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a reproducible jitter source.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            window: Uniform::new_inclusive(REFRESH_WINDOW_MIN, REFRESH_WINDOW_MAX),
        }
    }
}

impl Default for UniformJitter {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RefreshJitter for UniformJitter {
    fn refresh_factor(&mut self) -> f64 {
        self.window.sample(&mut self.rng)
    }
}

// == Fixed Jitter ==
/// Always returns the same fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter(pub f64);

impl RefreshJitter for FixedJitter {
    fn refresh_factor(&mut self) -> f64 {
        self.0
    }
}
