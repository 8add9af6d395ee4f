//! Batched Pearson Correlation over the Shared Window
//!
//! ## Cadence
//!
//! Coefficients are recomputed only when the [`CorrelationWindow`]
//! completes a full cycle, once every `M` pushes. Between wraps the
//! published [`CorrelationSet`] is stale on purpose: it holds the
//! values from the last wrap, and during the very first `M - 1` ticks
//! it holds its zero-initialized defaults. This is an intentional
//! batching choice for the target hardware, not a bug; a
//! rolling/incremental coefficient would change the logged output and
//! break replay comparisons against existing data files.
//!
//! ## Zero Fallback
//!
//! When either series is constant the product-moment denominator is
//! zero and [`pearson`] returns exactly `0.0` instead of NaN. Zero is
//! *not* a statistically neutral value here (an undefined coefficient
//! is not "no correlation"), but it keeps the CSV numeric and the
//! significance test quiet. Known approximation, kept for
//! compatibility.

use crate::constants::CORRELATION_THRESHOLD;
use crate::window::CorrelationWindow;

/// Product-moment correlation coefficient of two equal-length series.
///
/// `(n·Σxy − Σx·Σy) / sqrt((n·Σx² − (Σx)²)(n·Σy² − (Σy)²))`, with the
/// documented `0.0` fallback when the denominator vanishes. Symmetric
/// in its arguments; `pearson(x, x)` is 1 for any non-constant `x`
/// (modulo float rounding).
pub fn pearson(x: &[f32], y: &[f32]) -> f32 {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len() as f32;

    let mut sum_x = 0.0f32;
    let mut sum_y = 0.0f32;
    let mut sum_xy = 0.0f32;
    let mut sum_x2 = 0.0f32;
    let mut sum_y2 = 0.0f32;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        sum_x += xi;
        sum_y += yi;
        sum_xy += xi * yi;
        sum_x2 += xi * xi;
        sum_y2 += yi * yi;
    }

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = libm::sqrtf((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y));

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// The three unordered variable pairs, in their fixed report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariablePair {
    /// Temperature vs. air humidity (`Corr1`).
    TemperatureAirHumidity,
    /// Temperature vs. soil moisture (`Corr2`).
    TemperatureSoilMoisture,
    /// Air humidity vs. soil moisture (`Corr3`).
    AirHumiditySoilMoisture,
}

impl VariablePair {
    /// Human-readable label for diagnostics.
    pub const fn label(self) -> &'static str {
        match self {
            Self::TemperatureAirHumidity => "temperature/air-humidity",
            Self::TemperatureSoilMoisture => "temperature/soil-moisture",
            Self::AirHumiditySoilMoisture => "air-humidity/soil-moisture",
        }
    }
}

/// One pair's coefficient as of the last window wrap.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairCorrelation {
    /// Pearson coefficient in `[-1, 1]`, or the `0.0` fallback.
    pub coefficient: f32,
    /// Which pair this coefficient belongs to.
    pub pair: VariablePair,
}

impl PairCorrelation {
    const fn zeroed(pair: VariablePair) -> Self {
        Self {
            coefficient: 0.0,
            pair,
        }
    }

    /// Whether the coefficient's magnitude clears the fixed threshold.
    pub fn is_significant(&self) -> bool {
        let c = self.coefficient;
        let magnitude = if c < 0.0 { -c } else { c };
        magnitude > CORRELATION_THRESHOLD
    }
}

/// The batch-computed coefficients for all three pairs.
///
/// Zero-initialized at cold start; refreshed as a unit by
/// [`CorrelationSet::recompute`] when the window wraps.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorrelationSet {
    /// Temperature vs. air humidity.
    pub temp_air: PairCorrelation,
    /// Temperature vs. soil moisture.
    pub temp_soil: PairCorrelation,
    /// Air humidity vs. soil moisture.
    pub air_soil: PairCorrelation,
}

impl CorrelationSet {
    /// The cold-start set: all coefficients zero.
    pub const fn new() -> Self {
        Self {
            temp_air: PairCorrelation::zeroed(VariablePair::TemperatureAirHumidity),
            temp_soil: PairCorrelation::zeroed(VariablePair::TemperatureSoilMoisture),
            air_soil: PairCorrelation::zeroed(VariablePair::AirHumiditySoilMoisture),
        }
    }

    /// Recomputes all three coefficients from the full window.
    ///
    /// Called once per window cycle; the caller decides when (on the
    /// wrap signal from [`CorrelationWindow::push`]).
    pub fn recompute<const M: usize>(&mut self, window: &CorrelationWindow<M>) {
        self.temp_air.coefficient = pearson(window.temperature(), window.air_humidity());
        self.temp_soil.coefficient = pearson(window.temperature(), window.soil_moisture());
        self.air_soil.coefficient = pearson(window.air_humidity(), window.soil_moisture());
    }

    /// The coefficients in fixed CSV column order.
    pub fn in_report_order(&self) -> [PairCorrelation; 3] {
        [self.temp_air, self.temp_soil, self.air_soil]
    }
}

impl Default for CorrelationSet {
    fn default() -> Self {
        Self::new()
    }
}
