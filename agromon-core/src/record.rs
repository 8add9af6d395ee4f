//! CSV Record Assembly
//!
//! Builds the header block and the one-row-per-tick payload for the
//! append-only record store. The column layout is load-bearing: the
//! offline analysis scripts parse these exact names and positions, so
//! the header string is reproduced byte for byte, including the
//! legacy duplicate `MedUAr`/`MedT`/`MedUS` labels (the original sheet
//! used the same abbreviation for *média* and *mediana*).
//!
//! Formatting contract: raw values and statistics print with 2 decimal
//! places, correlation coefficients with 4. Outlier flags are the
//! Portuguese `"SIM"`/`"NAO"` the downstream tooling expects.

use core::fmt::Write;

use crate::clock::SyntheticClock;
use crate::correlation::CorrelationSet;
use crate::errors::RecordResult;
use crate::sensor::SensorSample;
use crate::stats::SummaryStats;

/// One assembled CSV line. 512 bytes is generous headroom over the
/// worst-case row (all fields NaN still fits with room to spare).
pub type RecordLine = heapless::String<512>;

/// The fixed column header, written once when the store is empty.
pub const CSV_HEADER: &str = "Data,Hora,\
UmidadeAr,MedUAr,DesvUAr,Q1UAr,MedUAr,Q3UAr,OutUAr,\
Temp,MedT,DesvT,Q1T,MedT,Q3T,OutT,\
USolo,MedUS,DesvUS,Q1US,MedUS,Q3US,OutUS,\
Corr1,Corr2,Corr3";

/// CSV flag for the outlier column.
pub fn outlier_label(is_outlier: bool) -> &'static str {
    if is_outlier {
        "SIM"
    } else {
        "NAO"
    }
}

/// The two `#` comment lines naming the reference date/time.
///
/// Written under the header when a fresh store is initialized, so
/// offline tooling can anchor the synthetic calendar of a run.
pub fn reference_comments(clock: &SyntheticClock) -> RecordResult<[RecordLine; 2]> {
    let mut date_line = RecordLine::new();
    write!(date_line, "# Data de referencia: {}", clock.date_string(0))?;

    let mut time_line = RecordLine::new();
    write!(time_line, "# Hora de inicio: {}", clock.time_string(0))?;

    Ok([date_line, time_line])
}

/// Appends one variable's raw value and statistics block to the row.
fn write_variable(line: &mut RecordLine, raw: f32, stats: &SummaryStats) -> RecordResult<()> {
    write!(
        line,
        ",{raw:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{}",
        stats.mean,
        stats.std_dev,
        stats.q1,
        stats.median,
        stats.q3,
        outlier_label(stats.is_outlier),
    )?;
    Ok(())
}

/// Assembles one data row.
///
/// Column order: date, time, then per variable in fixed order (air
/// humidity, temperature, soil moisture) the raw value and its
/// statistics block, then the three correlation coefficients in fixed
/// pair order.
pub fn build_row(
    date: &str,
    time: &str,
    sample: &SensorSample,
    air_humidity: &SummaryStats,
    temperature: &SummaryStats,
    soil_moisture: &SummaryStats,
    correlations: &CorrelationSet,
) -> RecordResult<RecordLine> {
    let mut line = RecordLine::new();
    write!(line, "{date},{time}")?;

    write_variable(&mut line, sample.air_humidity, air_humidity)?;
    write_variable(&mut line, sample.temperature, temperature)?;
    write_variable(&mut line, sample.soil_moisture, soil_moisture)?;

    for pair in correlations.in_report_order() {
        write!(line, ",{:.4}", pair.coefficient)?;
    }

    Ok(line)
}
