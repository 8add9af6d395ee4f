//! Sensor Collaborator Interface and Soil Calibration
//!
//! The statistics core never touches pins or buses. Whatever actually
//! reads the DHT-class climate sensor and the soil ADC implements
//! [`SensorSource`]; failed reads cross the boundary as `None`, never
//! as NaN. NaN only appears inside the engine, at the window-insertion
//! boundary, where a single numeric representation keeps the
//! statistics code simple.

use crate::constants::{SOIL_RAW_DRY, SOIL_RAW_WET};

/// One tick's readings after calibration, consumed immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorSample {
    /// Air temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative air humidity in percent.
    pub air_humidity: f32,
    /// Soil moisture in percent, from the calibrated remap.
    pub soil_moisture: f32,
}

/// Hardware sensor collaborator.
///
/// Implementations wrap the actual drivers. `&mut self` because most
/// one-wire and ADC drivers need exclusive access during a conversion.
pub trait SensorSource {
    /// Air temperature in degrees Celsius; `None` on a failed read.
    fn read_temperature(&mut self) -> Option<f32>;

    /// Relative air humidity in percent; `None` on a failed read.
    fn read_air_humidity(&mut self) -> Option<f32>;

    /// Raw soil-probe ADC value, 0..=1023.
    ///
    /// There is no failure signal: the ADC always converts something,
    /// and out-of-calibration values are handled by clamping in
    /// [`soil_moisture_percent`].
    fn read_soil_raw(&mut self) -> u16;
}

/// Maps a raw soil-probe reading to a moisture percentage.
///
/// Capacitive probes read *lower* when wet, so the clamped linear remap
/// of `[SOIL_RAW_WET, SOIL_RAW_DRY]` onto `[0, 100]` is inverted:
/// `SOIL_RAW_WET` and below map to 100 %, `SOIL_RAW_DRY` and above map
/// to 0 %. Always finite; never gated on validity.
pub fn soil_moisture_percent(raw: u16) -> f32 {
    let clamped = raw.clamp(SOIL_RAW_WET, SOIL_RAW_DRY);
    let span = (SOIL_RAW_DRY - SOIL_RAW_WET) as f32;
    let dryness = (clamped - SOIL_RAW_WET) as f32 * 100.0 / span;
    100.0 - dryness
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wet_calibration_point_is_fully_moist() {
        assert_eq!(soil_moisture_percent(SOIL_RAW_WET), 100.0);
    }

    #[test]
    fn dry_calibration_point_is_fully_dry() {
        assert_eq!(soil_moisture_percent(SOIL_RAW_DRY), 0.0);
    }

    #[test]
    fn out_of_range_raw_values_clamp() {
        // Probe shorted or disconnected: still a finite percentage.
        assert_eq!(soil_moisture_percent(0), 100.0);
        assert_eq!(soil_moisture_percent(1023), 0.0);
    }

    #[test]
    fn wetter_soil_reads_higher_percent() {
        let wetter = soil_moisture_percent(400);
        let drier = soil_moisture_percent(800);
        assert!(wetter > drier);
        assert!(wetter < 100.0 && drier > 0.0);
    }

    #[test]
    fn midpoint_is_near_half_scale() {
        // 300 + (1023-300)/2 ≈ 661
        let mid = soil_moisture_percent(661);
        assert!((mid - 50.0).abs() < 0.1);
    }
}
