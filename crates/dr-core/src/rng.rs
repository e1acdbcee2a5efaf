//! The random number port.
//!
//! The core never calls a global generator. Everything that rolls takes a
//! `&mut impl RandomSource`, which makes every round reproducible from a
//! seed and lets tests script exact outcomes with [`SequenceRng`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A uniform random source producing values in `[0, 1)`.
pub trait RandomSource {
    /// Draw the next uniform sample in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Returns true with probability `p` (one draw).
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Draw `floor(sample * n)`, an integer in `0..n` (one draw).
    fn below(&mut self, n: u32) -> u32 {
        let value = (self.next_f64() * f64::from(n)).floor() as u32;
        value.min(n.saturating_sub(1))
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// A seeded pseudo-random source backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRng {
    fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }
}

/// Replays a fixed list of samples, wrapping around at the end.
///
/// Samples are clamped into `[0, 1)`. An empty sequence always yields 0.0.
#[derive(Debug, Clone, Default)]
pub struct SequenceRng {
    samples: Vec<f64>,
    cursor: usize,
}

impl SequenceRng {
    /// Create a source that yields `samples` in order, cyclically.
    pub fn new(samples: impl Into<Vec<f64>>) -> Self {
        Self {
            samples: samples.into(),
            cursor: 0,
        }
    }

    /// A source that always yields the same sample.
    pub fn constant(sample: f64) -> Self {
        Self::new(vec![sample])
    }

    /// Number of samples drawn so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        sample.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
