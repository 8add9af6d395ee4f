//! The Per-Tick Monitor
//!
//! [`Monitor`] owns every piece of mutable state in the crate and runs
//! the whole sample → statistics → correlation → log cycle. Control
//! flow is single-threaded and run-to-completion: one call to
//! [`Monitor::tick`] either does nothing (interval gate), skips
//! (sensor or storage trouble), or logs exactly one CSV row. Nothing
//! suspends mid-tick, so no locking is needed; if a target platform
//! adds real concurrency, the whole tick must become a critical
//! section, because the windows and statistics are not individually
//! safe under interleaving.
//!
//! ## Failure Policy (by tick stage)
//!
//! - **Sensor read**: a missing or non-finite temperature/air-humidity
//!   reading skips the entire tick — no window mutation, no logging.
//!   The next attempt is the next natural interval; there is no retry.
//! - **Statistics**: never fail; degenerate input degrades to NaN in
//!   the row.
//! - **Storage**: any store error after the windows are updated skips
//!   that tick's write silently. The device keeps sampling; a
//!   permanently absent store at startup is the glue code's problem
//!   (the original firmware halted with a diagnostic).

use crate::clock::{SyntheticClock, Timestamp};
use crate::constants::{CORRELATION_WINDOW_SIZE, SAMPLE_INTERVAL_MS, SAMPLE_WINDOW_SIZE};
use crate::correlation::CorrelationSet;
use crate::record::{build_row, reference_comments, CSV_HEADER};
use crate::sensor::{soil_moisture_percent, SensorSample, SensorSource};
use crate::stats::SummaryStats;
use crate::store::RecordStore;
use crate::window::{CorrelationWindow, SampleWindow};

/// Why a tick did not produce a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Temperature or air humidity came back missing or non-finite.
    /// The tick was abandoned before any state changed.
    SensorRead,
    /// The record store failed; windows and correlations were still
    /// updated, only the write was dropped.
    Storage,
}

/// What one call to [`Monitor::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The sampling interval has not elapsed yet.
    Idle,
    /// The tick fired but produced no row.
    Skipped(SkipReason),
    /// One CSV row was appended (plus the header block if the store
    /// was empty).
    Logged,
}

/// The statistics a tick computed, kept for display or telemetry glue.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickStats {
    /// The calibrated readings of the tick.
    pub sample: SensorSample,
    /// Air-humidity window statistics.
    pub air_humidity: SummaryStats,
    /// Temperature window statistics.
    pub temperature: SummaryStats,
    /// Soil-moisture window statistics.
    pub soil_moisture: SummaryStats,
}

/// The long-lived monitoring state machine.
///
/// One instance per device, created at startup and ticked from the
/// main loop with a monotonic millisecond timestamp. Const generics
/// fix the window capacities at compile time; the defaults come from
/// `constants.rs`.
pub struct Monitor<const N: usize = SAMPLE_WINDOW_SIZE, const M: usize = CORRELATION_WINDOW_SIZE> {
    interval_ms: u64,
    last_tick: Option<Timestamp>,
    clock: SyntheticClock,
    temperature: SampleWindow<N>,
    air_humidity: SampleWindow<N>,
    soil_moisture: SampleWindow<N>,
    correlation_window: CorrelationWindow<M>,
    correlations: CorrelationSet,
    last_stats: Option<TickStats>,
}

impl<const N: usize, const M: usize> Monitor<N, M> {
    /// Creates a cold-start monitor with the flash-time configuration.
    pub fn new() -> Self {
        #[cfg(feature = "log")]
        log::info!(
            "agromon-core {}: sample window {}, correlation window {}, interval {} ms",
            crate::VERSION,
            N,
            M,
            SAMPLE_INTERVAL_MS,
        );

        Self {
            interval_ms: SAMPLE_INTERVAL_MS,
            last_tick: None,
            clock: SyntheticClock::from_reference(),
            temperature: SampleWindow::new(),
            air_humidity: SampleWindow::new(),
            soil_moisture: SampleWindow::new(),
            correlation_window: CorrelationWindow::new(),
            correlations: CorrelationSet::new(),
            last_stats: None,
        }
    }

    /// Overrides the sampling interval (milliseconds).
    pub fn with_interval(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Overrides the reference clock.
    pub fn with_clock(mut self, clock: SyntheticClock) -> Self {
        self.clock = clock;
        self
    }

    /// Runs at most one full cycle.
    ///
    /// `now` is elapsed milliseconds since boot and must be
    /// monotonically non-decreasing across calls. The first call
    /// always fires; afterwards the gate admits one tick per interval,
    /// and the gate timestamp advances when a tick is *admitted*, so a
    /// skipped tick retries at the next natural interval only.
    pub fn tick<S, R>(&mut self, now: Timestamp, sensors: &mut S, store: &mut R) -> TickOutcome
    where
        S: SensorSource,
        R: RecordStore,
    {
        if let Some(last) = self.last_tick {
            if now.saturating_sub(last) < self.interval_ms {
                return TickOutcome::Idle;
            }
        }
        self.last_tick = Some(now);

        // Climate reads gate the whole tick. Drivers signal failure
        // with None; a driver that leaks NaN through Some is treated
        // the same way.
        let temperature = sensors.read_temperature().filter(|v| v.is_finite());
        let air_humidity = sensors.read_air_humidity().filter(|v| v.is_finite());
        let (Some(temperature), Some(air_humidity)) = (temperature, air_humidity) else {
            #[cfg(feature = "log")]
            log::warn!("climate sensor read failed, skipping tick at {} ms", now);
            return TickOutcome::Skipped(SkipReason::SensorRead);
        };

        // Soil moisture is clamped, never gated.
        let soil_moisture = soil_moisture_percent(sensors.read_soil_raw());
        let sample = SensorSample {
            temperature,
            air_humidity,
            soil_moisture,
        };

        // Statistics first, push second: the new reading is the
        // outlier candidate against the window as it stood, then joins
        // the window for later ticks.
        let stats = TickStats {
            sample,
            air_humidity: SummaryStats::compute(&self.air_humidity, air_humidity),
            temperature: SummaryStats::compute(&self.temperature, temperature),
            soil_moisture: SummaryStats::compute(&self.soil_moisture, soil_moisture),
        };
        self.temperature.push(temperature);
        self.air_humidity.push(air_humidity);
        self.soil_moisture.push(soil_moisture);

        // Correlations are batched: recomputed only when the shared
        // window completes a cycle, stale in between.
        if self
            .correlation_window
            .push(temperature, air_humidity, soil_moisture)
        {
            self.correlations.recompute(&self.correlation_window);
        }

        self.alert_outliers(&stats);
        self.last_stats = Some(stats);

        self.write_record(now, &stats, store)
    }

    /// Coefficients as of the last correlation-window wrap (zeros
    /// before the first wrap).
    pub fn correlations(&self) -> &CorrelationSet {
        &self.correlations
    }

    /// Statistics from the last non-skipped tick, if any.
    pub fn last_stats(&self) -> Option<&TickStats> {
        self.last_stats.as_ref()
    }

    /// The reference clock in use.
    pub fn clock(&self) -> &SyntheticClock {
        &self.clock
    }

    fn alert_outliers(&self, stats: &TickStats) {
        #[cfg(feature = "log")]
        {
            if stats.temperature.is_outlier {
                log::warn!(
                    "temperature {:.2} outside IQR fences [{:.2}, {:.2}]",
                    stats.sample.temperature,
                    stats.temperature.q1 - crate::constants::IQR_FACTOR * stats.temperature.iqr,
                    stats.temperature.q3 + crate::constants::IQR_FACTOR * stats.temperature.iqr,
                );
            }
            if stats.air_humidity.is_outlier {
                log::warn!("air humidity {:.2} flagged as outlier", stats.sample.air_humidity);
            }
            if stats.soil_moisture.is_outlier {
                log::warn!("soil moisture {:.2} flagged as outlier", stats.sample.soil_moisture);
            }
        }
        #[cfg(not(feature = "log"))]
        let _ = stats;
    }

    fn write_record<R: RecordStore>(
        &self,
        now: Timestamp,
        stats: &TickStats,
        store: &mut R,
    ) -> TickOutcome {
        let needs_header = match store.is_empty() {
            Ok(empty) => empty,
            Err(_) => return TickOutcome::Skipped(SkipReason::Storage),
        };

        if needs_header {
            let Ok(comments) = reference_comments(&self.clock) else {
                return TickOutcome::Skipped(SkipReason::Storage);
            };
            if store.append_line(CSV_HEADER).is_err()
                || store.append_line(&comments[0]).is_err()
                || store.append_line(&comments[1]).is_err()
            {
                return TickOutcome::Skipped(SkipReason::Storage);
            }
        }

        let date = self.clock.date_string(now);
        let time = self.clock.time_string(now);
        let row = match build_row(
            &date,
            &time,
            &stats.sample,
            &stats.air_humidity,
            &stats.temperature,
            &stats.soil_moisture,
            &self.correlations,
        ) {
            Ok(row) => row,
            Err(_) => return TickOutcome::Skipped(SkipReason::Storage),
        };

        if store.append_line(&row).is_err() {
            return TickOutcome::Skipped(SkipReason::Storage);
        }

        TickOutcome::Logged
    }
}

impl<const N: usize, const M: usize> Default for Monitor<N, M> {
    fn default() -> Self {
        Self::new()
    }
}
