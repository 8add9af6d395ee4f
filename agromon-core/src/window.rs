//! Fixed-Size Circular Sample Windows
//!
//! ## Overview
//!
//! This module provides the two ring buffers the statistics engine runs
//! on. Both have their size fixed at compile time through const
//! generics and never allocate:
//!
//! - [`SampleWindow`]: one variable, capacity `N`, feeds the
//!   descriptive-statistics computation every tick.
//! - [`CorrelationWindow`]: three variables in lockstep, capacity `M`,
//!   feeds the batched Pearson computation once per full cycle.
//!
//! ## Design Rationale
//!
//! Unlike a grow-until-full buffer, these windows are *always* at
//! capacity: they start zero-filled and every push overwrites the slot
//! under the cursor in place. Downstream statistics therefore always
//! see exactly `N` (or `M`) entries, which keeps the quartile index
//! arithmetic fixed and branch-free. The price is that the first few
//! cycles mix real readings with the zero fill; the deployment accepts
//! that warm-up noise.
//!
//! ### Memory Layout
//!
//! ```text
//! SampleWindow<8> memory layout:
//! ┌────┬────┬────┬────┬────┬────┬────┬────┐
//! │ f32│ f32│ f32│ f32│ f32│ f32│ f32│ f32│  ← 32 bytes of samples
//! └────┴────┴────┴────┴────┴────┴────┴────┘
//!    ↑ write_pos wraps modulo 8
//! ```
//!
//! The cursor modulo compiles to a bit mask when the capacity is a
//! power of two, so prefer sizes like 8, 16, 32.

/// Fixed-capacity, overwrite-in-place ring buffer for one variable.
///
/// ## Type Parameter
///
/// - `N`: window capacity, a compile-time constant.
///
/// ## Internal Invariants
///
/// - `write_pos < N` at all times.
/// - Logical length is always exactly `N`; slots not yet written in the
///   first cycle hold the zero fill from construction.
#[derive(Debug, Clone)]
pub struct SampleWindow<const N: usize> {
    /// Sample storage, zero-initialized at cold start.
    data: [f32; N],

    /// Index the next push overwrites; wraps to 0 at N.
    write_pos: usize,
}

impl<const N: usize> SampleWindow<N> {
    /// Creates a zero-filled window.
    ///
    /// `const fn`, so windows can live in `static` storage on targets
    /// without a heap:
    ///
    /// ```rust
    /// use agromon_core::window::SampleWindow;
    /// static TEMP_HISTORY: SampleWindow<8> = SampleWindow::new();
    /// ```
    pub const fn new() -> Self {
        Self {
            data: [0.0; N],
            write_pos: 0,
        }
    }

    /// Overwrites the slot at the cursor and advances it modulo `N`.
    ///
    /// The oldest entry is silently replaced; there is no error path
    /// and no way for the window to shrink.
    pub fn push(&mut self, value: f32) {
        self.data[self.write_pos] = value;
        self.write_pos = (self.write_pos + 1) % N;
    }

    /// Window capacity (also its constant logical length).
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Raw window contents in storage order.
    ///
    /// Storage order is *not* chronological once the cursor has
    /// wrapped. The statistics code never needs chronology: every
    /// reduction over the window (sum, sort) is order-insensitive.
    pub fn as_slice(&self) -> &[f32; N] {
        &self.data
    }

    /// Current cursor position, exposed for tests and diagnostics.
    pub fn cursor(&self) -> usize {
        self.write_pos
    }
}

impl<const N: usize> Default for SampleWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Three parallel sample series sharing one cursor.
///
/// Holds synchronized (temperature, air humidity, soil moisture)
/// triples for the Pearson computation. The invariant that all three
/// series advance in lockstep is structural: [`Self::push`] is the
/// only mutator and writes all three slots before advancing.
#[derive(Debug, Clone)]
pub struct CorrelationWindow<const M: usize> {
    temperature: [f32; M],
    air_humidity: [f32; M],
    soil_moisture: [f32; M],
    write_pos: usize,
}

impl<const M: usize> CorrelationWindow<M> {
    /// Creates a zero-filled correlation window.
    pub const fn new() -> Self {
        Self {
            temperature: [0.0; M],
            air_humidity: [0.0; M],
            soil_moisture: [0.0; M],
            write_pos: 0,
        }
    }

    /// Writes one synchronized triple and advances the shared cursor.
    ///
    /// Returns `true` exactly when the cursor wrapped back to slot 0,
    /// i.e. the window just completed a full cycle. The caller uses
    /// that as the trigger for batch correlation recomputation; between
    /// wraps the published coefficients stay deliberately stale.
    pub fn push(&mut self, temperature: f32, air_humidity: f32, soil_moisture: f32) -> bool {
        self.temperature[self.write_pos] = temperature;
        self.air_humidity[self.write_pos] = air_humidity;
        self.soil_moisture[self.write_pos] = soil_moisture;
        self.write_pos = (self.write_pos + 1) % M;
        self.write_pos == 0
    }

    /// Window capacity per series.
    pub const fn capacity(&self) -> usize {
        M
    }

    /// Temperature series in storage order.
    pub fn temperature(&self) -> &[f32; M] {
        &self.temperature
    }

    /// Air-humidity series in storage order.
    pub fn air_humidity(&self) -> &[f32; M] {
        &self.air_humidity
    }

    /// Soil-moisture series in storage order.
    pub fn soil_moisture(&self) -> &[f32; M] {
        &self.soil_moisture
    }
}

impl<const M: usize> Default for CorrelationWindow<M> {
    fn default() -> Self {
        Self::new()
    }
}
