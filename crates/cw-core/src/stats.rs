//! Streaming mean/variance (Welford's algorithm).
//!
//! Observations are folded in one at a time; nothing is stored.  The update
//!
//! ```text
//! n    += 1
//! d     = x - mean
//! mean += d / n
//! m2   += d * (x - mean)
//! ```
//!
//! avoids the catastrophic cancellation of the naive `Σx² - n·mean²` form.

/// Running count, mean, and sum of squared deviations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Welford {
    count: u64,
    mean:  f64,
    m2:    f64,
}

/// The finalized view of a [`Welford`] accumulator.
///
/// Values that are undefined for the current count are `None` rather than a
/// misleading zero.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    pub count: u64,
    /// Defined for `count >= 1`.
    pub mean: Option<f64>,
    /// Population variance `m2 / count`; defined for `count >= 2`.
    pub variance: Option<f64>,
    /// Sample variance `m2 / (count - 1)`; defined for `count >= 2`.
    pub sample_variance: Option<f64>,
}

impl Summary {
    /// Population standard deviation.
    pub fn std_dev(&self) -> Option<f64> {
        self.variance.map(f64::sqrt)
    }
}

impl Welford {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one observation into the accumulator.  O(1).
    #[inline]
    pub fn update(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Combine another accumulator into this one (Chan et al.).
    ///
    /// The result is the accumulator that would have seen both streams.
    pub fn merge(&mut self, other: &Welford) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }
        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let total = n_a + n_b;
        let delta = other.mean - self.mean;
        self.mean += delta * n_b / total;
        self.m2 += other.m2 + delta * delta * n_a * n_b / total;
        self.count += other.count;
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn finalize(&self) -> Summary {
        let mean = (self.count >= 1).then_some(self.mean);
        let (variance, sample_variance) = if self.count >= 2 {
            let n = self.count as f64;
            (Some(self.m2 / n), Some(self.m2 / (n - 1.0)))
        } else {
            (None, None)
        };
        Summary { count: self.count, mean, variance, sample_variance }
    }
}
