//! Deterministic random-variate generation.
//!
//! # Determinism strategy
//!
//! A run draws from three independent `SmallRng` streams (pedestrians,
//! automobiles, button presses), each seeded by:
//!
//!   seed = run_seed XOR (stream_index * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads neighbouring indices uniformly across the seed space.
//! Keeping the streams apart means a change in how often pedestrians press
//! the button never shifts the arrival times of pedestrians or cars.
//!
//! # Variates
//!
//! All variates are inverse-CDF transforms of an open-interval uniform draw
//! from any [`UniformSource`], so a run can replay recorded uniforms from a
//! [`TraceSource`][crate::TraceSource] instead of a seeded generator.  Draws
//! are fallible because a trace can run dry or hold a malformed line.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::TraceError;

/// Result of a draw from a [`UniformSource`].
pub type DrawResult<T> = Result<T, TraceError>;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Mix a base seed with a small index (stream number, trial number, …).
#[inline]
pub fn mix_seed(seed: u64, index: u64) -> u64 {
    seed ^ index.wrapping_add(1).wrapping_mul(MIXING_CONSTANT)
}

// ── Uniform sources ───────────────────────────────────────────────────────────

/// A source of uniform values in `[0, 1]`.
pub trait UniformSource {
    fn next_uniform(&mut self) -> DrawResult<f64>;
}

impl UniformSource for SmallRng {
    #[inline]
    fn next_uniform(&mut self) -> DrawResult<f64> {
        Ok(self.r#gen::<f64>())
    }
}

/// Draw from `src` until the value lies strictly inside `(0, 1)`.
///
/// Exact 0 would give a zero-length interval from [`exponential`] and exact 1
/// would give `ln(0)`; both are rejected and redrawn.
pub fn open_unit<S: UniformSource + ?Sized>(src: &mut S) -> DrawResult<f64> {
    loop {
        let u = src.next_uniform()?;
        if u > 0.0 && u < 1.0 {
            return Ok(u);
        }
    }
}

/// Exponential variate with the given `rate` (mean `1 / rate`).
///
/// # Panics
/// Panics if `rate` is not positive and finite.  Rates come from validated
/// configuration, so a bad rate here is a programming error.
pub fn exponential<S: UniformSource + ?Sized>(src: &mut S, rate: f64) -> DrawResult<f64> {
    assert!(
        rate > 0.0 && rate.is_finite(),
        "exponential variate requires a positive finite rate, got {rate}"
    );
    Ok(-(1.0 - open_unit(src)?).ln() / rate)
}

/// Uniform variate in `(lo, hi)`.
pub fn uniform<S: UniformSource + ?Sized>(src: &mut S, lo: f64, hi: f64) -> DrawResult<f64> {
    Ok(lo + (hi - lo) * open_unit(src)?)
}

/// `true` with probability `p` (clamped to `[0, 1]`).
pub fn bernoulli<S: UniformSource + ?Sized>(src: &mut S, p: f64) -> DrawResult<bool> {
    Ok(open_unit(src)? >= 1.0 - p.clamp(0.0, 1.0))
}

// ── VariateRng ────────────────────────────────────────────────────────────────

/// One uniform stream with variate helpers.
pub struct VariateRng(Box<dyn UniformSource>);

impl VariateRng {
    /// A `SmallRng` stream seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self::from_source(SmallRng::seed_from_u64(seed))
    }

    /// Draw from any uniform source, e.g. a recorded trace.
    pub fn from_source<S: UniformSource + 'static>(source: S) -> Self {
        VariateRng(Box::new(source))
    }

    #[inline]
    pub fn exponential(&mut self, rate: f64) -> DrawResult<f64> {
        exponential(self, rate)
    }

    #[inline]
    pub fn uniform(&mut self, lo: f64, hi: f64) -> DrawResult<f64> {
        uniform(self, lo, hi)
    }

    #[inline]
    pub fn bernoulli(&mut self, p: f64) -> DrawResult<bool> {
        bernoulli(self, p)
    }
}

impl UniformSource for VariateRng {
    #[inline]
    fn next_uniform(&mut self) -> DrawResult<f64> {
        self.0.next_uniform()
    }
}

// ── RngStreams ────────────────────────────────────────────────────────────────

/// The three independent streams consumed by one run.
pub struct RngStreams {
    /// Pedestrian inter-arrival times, walking speeds, impatience retries.
    pub pedestrians: VariateRng,
    /// Automobile inter-arrival times.
    pub automobiles: VariateRng,
    /// Probabilistic button presses.
    pub button: VariateRng,
}

impl RngStreams {
    /// Seeded streams derived from the run seed.
    pub fn new(seed: u64) -> Self {
        Self {
            pedestrians: VariateRng::new(mix_seed(seed, 0)),
            automobiles: VariateRng::new(mix_seed(seed, 1)),
            button:      VariateRng::new(mix_seed(seed, 2)),
        }
    }

    /// Streams over caller-supplied sources.
    pub fn from_sources(
        pedestrians: VariateRng,
        automobiles: VariateRng,
        button:      VariateRng,
    ) -> Self {
        Self { pedestrians, automobiles, button }
    }
}
