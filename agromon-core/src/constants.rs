//! Compile-Time Configuration for AgroMon
//!
//! All tunable values live here. There is no runtime configuration
//! surface: the firmware is flashed with the values it will run with,
//! so every knob is a documented constant.
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. When adding new constants, include documentation with units
//! 3. Reference sensor datasheets or calibration runs where applicable

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: u64 = 60;

/// Hours per day.
pub const HOURS_PER_DAY: u64 = 24;

/// Seconds per hour.
pub const SECONDS_PER_HOUR: u64 = SECONDS_PER_MINUTE * MINUTES_PER_HOUR;

/// Seconds per day.
pub const SECONDS_PER_DAY: u64 = SECONDS_PER_HOUR * HOURS_PER_DAY;

// ===== SAMPLING =====

/// Sampling interval between ticks (milliseconds).
///
/// 5 minutes. Soil moisture and greenhouse climate move slowly;
/// anything faster just burns flash write cycles on the record store.
pub const SAMPLE_INTERVAL_MS: u64 = 300_000;

/// Capacity of the per-variable descriptive-statistics window.
///
/// 8 samples = 40 minutes of history at the default interval.
/// Power of two so the ring cursor modulo compiles to a mask.
pub const SAMPLE_WINDOW_SIZE: usize = 8;

/// Capacity of the shared correlation window.
///
/// 12 samples = one hour of history. Pearson coefficients are
/// recomputed in batch each time this window completes a full cycle,
/// never incrementally.
pub const CORRELATION_WINDOW_SIZE: usize = 12;

// ===== STATISTICS =====

/// Tukey fence multiplier for the IQR outlier test.
///
/// 1.5 is the conventional "mild outlier" factor: values outside
/// `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]` are flagged.
pub const IQR_FACTOR: f32 = 1.5;

/// Absolute Pearson-coefficient threshold above which a pair of
/// variables is reported as significantly correlated.
pub const CORRELATION_THRESHOLD: f32 = 0.5;

// ===== SOIL MOISTURE CALIBRATION =====

/// Raw ADC reading of the soil probe fully submerged in water.
///
/// Capacitive probes read *lower* when wet. Calibrated per probe batch.
pub const SOIL_RAW_WET: u16 = 300;

/// Raw ADC reading of the soil probe in open air (10-bit ADC ceiling).
pub const SOIL_RAW_DRY: u16 = 1023;

// ===== REFERENCE DATE/TIME =====
//
// There is no RTC on the target board. Calendar output is synthesized
// from elapsed-milliseconds-since-boot plus the date/time the device
// was powered on, burned in at flash time.

/// Reference year at boot.
pub const REFERENCE_YEAR: u32 = 2025;

/// Reference month at boot (1-12).
pub const REFERENCE_MONTH: u32 = 4;

/// Reference day-of-month at boot (1-30, simplified calendar).
pub const REFERENCE_DAY: u32 = 29;

/// Hour of day at boot (0-23).
pub const START_HOUR: u32 = 13;

/// Minute of hour at boot (0-59).
pub const START_MINUTE: u32 = 20;

/// Every month is treated as exactly this many days.
///
/// The synthetic calendar is a deliberate simplification: with no RTC
/// and multi-week deployments, drift against the real calendar was
/// accepted in exchange for trivially verifiable date math. Day 30
/// rolls into day 1 of the next month, never day 31.
pub const DAYS_PER_MONTH: u32 = 30;

/// Months per year in the synthetic calendar.
pub const MONTHS_PER_YEAR: u32 = 12;
