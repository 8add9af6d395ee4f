//! Statistics core for AgroMon
//!
//! Windowed descriptive statistics, IQR outlier flagging, and batched
//! Pearson correlation for a soil/climate field monitor. Designed for
//! edge devices with limited resources.
//!
//! Key constraints:
//! - No heap allocation anywhere in the tick path
//! - Never panics on degraded sensor data (NaN in, NaN out)
//! - Bit-stable CSV output consumed by existing offline tooling
//!
//! ```no_run
//! use agromon_core::{Monitor, SensorSource, store::MemoryStore};
//!
//! struct Probes; // wraps the real drivers
//! # impl SensorSource for Probes {
//! #     fn read_temperature(&mut self) -> Option<f32> { Some(22.0) }
//! #     fn read_air_humidity(&mut self) -> Option<f32> { Some(55.0) }
//! #     fn read_soil_raw(&mut self) -> u16 { 600 }
//! # }
//!
//! let mut monitor = Monitor::<8, 12>::new();
//! let mut probes = Probes;
//! let mut store: MemoryStore<64> = MemoryStore::new();
//!
//! // From the device main loop, with elapsed ms since boot:
//! monitor.tick(0, &mut probes, &mut store);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod clock;
pub mod constants;
pub mod correlation;
pub mod errors;
pub mod monitor;
pub mod record;
pub mod sensor;
pub mod stats;
pub mod store;
pub mod window;

// Public API
pub use clock::{SyntheticClock, Timestamp};
pub use correlation::{pearson, CorrelationSet, PairCorrelation, VariablePair};
pub use errors::{RecordError, RecordResult};
pub use monitor::{Monitor, SkipReason, TickOutcome, TickStats};
pub use sensor::{soil_moisture_percent, SensorSample, SensorSource};
pub use stats::SummaryStats;
pub use store::RecordStore;
pub use window::{CorrelationWindow, SampleWindow};

/// Crate version, for the startup banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
