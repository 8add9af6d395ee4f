//! Descriptive Statistics over a Sample Window
//!
//! Computes mean, sample variance/standard deviation, positional
//! quartiles, and a Tukey IQR outlier verdict from one
//! [`SampleWindow`] snapshot plus one candidate reading. Everything is
//! recomputed from scratch each tick; with `N = 8` a full sort plus two
//! passes is far cheaper than maintaining incremental state would be
//! worth.
//!
//! ## Degenerate Input Policy
//!
//! The engine never fails. NaN entries (failed reads that made it into
//! a window) are excluded from the mean/variance accumulation and its
//! divisor, but are *not* removed from the array the quartiles are read
//! from. With fewer than two finite entries the sample variance is
//! undefined and reported as NaN. An all-NaN window produces NaN
//! statistics and an `is_outlier` of `false`. A field logger that
//! crashes on bad numbers is worse than one that logs NaN.
//!
//! ## Quartile Estimator
//!
//! Quartiles are read at fixed indices of the sorted window:
//! `Q1 = sorted[N/4]`, `median = sorted[N/2]`, `Q3 = sorted[3N/4]`
//! (integer division, 0-based). This positional estimator is coarser
//! than interpolation but has been the crate's on-disk behavior since
//! the first deployment, so downstream analysis scripts depend on it.
//! With `N = 8` the indices are 2, 4, and 6. NaN entries sort after
//! every finite value (`f32::total_cmp`), so a window with NaN in it
//! can surface NaN quartiles; that ambiguity is inherited behavior and
//! kept as-is.

use crate::constants::IQR_FACTOR;
use crate::window::SampleWindow;

/// One tick's descriptive statistics for a single variable.
///
/// All fields derive from the window snapshot except `is_outlier`,
/// which additionally involves the candidate reading passed to
/// [`SummaryStats::compute`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummaryStats {
    /// Arithmetic mean of the finite window entries.
    pub mean: f32,
    /// Sample standard deviation; NaN with fewer than two finite entries.
    pub std_dev: f32,
    /// Sample variance; NaN with fewer than two finite entries.
    pub variance: f32,
    /// First quartile, `sorted[N/4]`.
    pub q1: f32,
    /// Median, `sorted[N/2]`.
    pub median: f32,
    /// Third quartile, `sorted[3N/4]`.
    pub q3: f32,
    /// Interquartile range, `q3 - q1`.
    pub iqr: f32,
    /// Whether the candidate reading fell outside the Tukey fences.
    pub is_outlier: bool,
}

impl SummaryStats {
    /// Computes the full statistics record for one window snapshot.
    ///
    /// `candidate` is the newest raw reading. It is tested against the
    /// window's quartile fences but is *not* part of the window here;
    /// the caller pushes it afterwards so it participates in later
    /// ticks' quartiles instead of its own fence.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use agromon_core::{stats::SummaryStats, window::SampleWindow};
    ///
    /// let mut window = SampleWindow::<8>::new();
    /// for v in [10.0, 12.0, 11.0, 13.0, 12.0, 14.0, 11.0, 13.0] {
    ///     window.push(v);
    /// }
    ///
    /// let stats = SummaryStats::compute(&window, 50.0);
    /// assert_eq!(stats.mean, 12.0);
    /// assert!(stats.is_outlier);
    /// ```
    pub fn compute<const N: usize>(window: &SampleWindow<N>, candidate: f32) -> Self {
        let samples = window.as_slice();

        // First pass: moments over the finite entries only.
        let mut sum = 0.0f32;
        let mut sum_sq = 0.0f32;
        let mut count = 0u32;
        for &value in samples.iter() {
            if value.is_finite() {
                sum += value;
                sum_sq += value * value;
                count += 1;
            }
        }

        let mean = if count == 0 {
            f32::NAN
        } else {
            sum / count as f32
        };

        // Sample variance via the computational formula. Undefined for
        // fewer than two finite entries; surfaced as NaN, not an error.
        let variance = if count <= 1 {
            f32::NAN
        } else {
            let n = count as f32;
            (sum_sq - n * mean * mean) / (n - 1.0)
        };
        let std_dev = libm::sqrtf(variance);

        // Second pass: order statistics over the *raw* window, NaNs
        // included. total_cmp keeps the sort deterministic by placing
        // NaN after every finite value.
        let mut sorted = *samples;
        sorted.sort_unstable_by(f32::total_cmp);

        let q1 = sorted[N / 4];
        let median = sorted[N / 2];
        let q3 = sorted[3 * N / 4];
        let iqr = q3 - q1;

        // Tukey fences. NaN quartiles make both comparisons false, so
        // a degenerate window never flags an outlier.
        let lower_fence = q1 - IQR_FACTOR * iqr;
        let upper_fence = q3 + IQR_FACTOR * iqr;
        let is_outlier = candidate < lower_fence || candidate > upper_fence;

        Self {
            mean,
            std_dev,
            variance,
            q1,
            median,
            q3,
            iqr,
            is_outlier,
        }
    }
}
