//! End-to-End Monitor Scenarios
//!
//! These tests drive the full tick cycle (sensor read → windows →
//! statistics → correlation → CSV) the way device glue would, with
//! scripted sensors and an in-memory record store. The scenario
//! constants mirror a realistic greenhouse deployment.

use agromon_core::{
    record::CSV_HEADER,
    store::MemoryStore,
    Monitor, SensorSource, SkipReason, SyntheticClock, TickOutcome,
};

// ===== SCENARIO CONSTANTS =====

/// Sampling interval used by the scenarios. Shorter than the
/// production 5 minutes so timestamps stay readable in failures.
const INTERVAL_MS: u64 = 60_000;

/// Window sizes matching the production configuration.
const SAMPLE_WINDOW: usize = 8;
const CORR_WINDOW: usize = 12;

/// Nominal greenhouse climate for the calm phases.
const NOMINAL_TEMP_C: f32 = 22.0;
const NOMINAL_HUMIDITY_PCT: f32 = 55.0;
const NOMINAL_SOIL_RAW: u16 = 600;

/// A heat spike far outside any plausible IQR fence.
const SPIKE_TEMP_C: f32 = 60.0;

/// Scripted sensor source driven by a per-tick script.
struct ScriptedSensors {
    temperature: Option<f32>,
    air_humidity: Option<f32>,
    soil_raw: u16,
}

impl ScriptedSensors {
    fn nominal() -> Self {
        Self {
            temperature: Some(NOMINAL_TEMP_C),
            air_humidity: Some(NOMINAL_HUMIDITY_PCT),
            soil_raw: NOMINAL_SOIL_RAW,
        }
    }
}

impl SensorSource for ScriptedSensors {
    fn read_temperature(&mut self) -> Option<f32> {
        self.temperature
    }

    fn read_air_humidity(&mut self) -> Option<f32> {
        self.air_humidity
    }

    fn read_soil_raw(&mut self) -> u16 {
        self.soil_raw
    }
}

fn scenario_monitor() -> Monitor<SAMPLE_WINDOW, CORR_WINDOW> {
    Monitor::new()
        .with_interval(INTERVAL_MS)
        .with_clock(SyntheticClock::new(2025, 4, 29, 13, 20))
}

fn data_rows(store: &MemoryStore<256>) -> Vec<&str> {
    store
        .lines()
        .iter()
        .map(|l| l.as_str())
        .filter(|l| !l.starts_with('#') && *l != CSV_HEADER)
        .collect()
}

#[test]
fn full_day_run_produces_stable_csv() {
    let mut monitor = scenario_monitor();
    let mut store: MemoryStore<256> = MemoryStore::new();

    // 100 ticks of slowly drifting climate.
    let mut logged = 0;
    for i in 0..100u64 {
        let mut sensors = ScriptedSensors {
            temperature: Some(NOMINAL_TEMP_C + (i % 5) as f32 * 0.3),
            air_humidity: Some(NOMINAL_HUMIDITY_PCT - (i % 7) as f32 * 0.5),
            soil_raw: NOMINAL_SOIL_RAW + (i % 11) as u16,
        };
        if monitor.tick(i * INTERVAL_MS, &mut sensors, &mut store) == TickOutcome::Logged {
            logged += 1;
        }
    }

    assert_eq!(logged, 100);
    // 3-line header block exactly once, then one row per tick.
    assert_eq!(store.lines().len(), 103);
    assert_eq!(store.lines()[0].as_str(), CSV_HEADER);
    assert_eq!(store.lines()[1].as_str(), "# Data de referencia: 2025-04-29");
    assert_eq!(store.lines()[2].as_str(), "# Hora de inicio: 13:20:00");

    // Every data row matches the 26-column header.
    for row in data_rows(&store) {
        assert_eq!(row.split(',').count(), 26, "malformed row: {row}");
    }

    // First row carries the boot timestamp, later rows advance.
    assert!(data_rows(&store)[0].starts_with("2025-04-29,13:20:00,"));
    assert!(data_rows(&store)[60].starts_with("2025-04-29,14:20:00,"));
}

#[test]
fn correlation_columns_are_stale_between_wraps() {
    let mut monitor = scenario_monitor();
    let mut store: MemoryStore<256> = MemoryStore::new();

    // Anti-correlated ramps so the first wrap produces r = -1.
    for i in 0..30u64 {
        let mut sensors = ScriptedSensors {
            temperature: Some(20.0 + i as f32),
            air_humidity: Some(80.0 - i as f32),
            soil_raw: NOMINAL_SOIL_RAW,
        };
        monitor.tick(i * INTERVAL_MS, &mut sensors, &mut store);
    }

    let rows = data_rows(&store);
    let corr1 = |row: &str| row.split(',').nth(23).unwrap().to_owned();

    // Zeros until the 12-slot window first wraps (rows 0-10).
    for row in rows[..11].iter().copied() {
        assert_eq!(corr1(row), "0.0000");
    }
    // From row 11 to row 22 the wrap value holds unchanged.
    let after_first_wrap = corr1(rows[11]);
    assert_eq!(after_first_wrap, "-1.0000");
    for row in rows[11..23].iter().copied() {
        assert_eq!(corr1(row), after_first_wrap);
    }
    // The second wrap recomputes (same ramps, same value here, but it
    // must still be a single batch update boundary).
    assert_eq!(corr1(rows[23]), "-1.0000");
}

#[test]
fn heat_spike_is_flagged_and_dropout_skips_rows() {
    let mut monitor = scenario_monitor();
    let mut store: MemoryStore<256> = MemoryStore::new();

    // Warm-up: fill the statistics windows with calm readings.
    for i in 0..SAMPLE_WINDOW as u64 {
        let mut sensors = ScriptedSensors::nominal();
        assert_eq!(
            monitor.tick(i * INTERVAL_MS, &mut sensors, &mut store),
            TickOutcome::Logged
        );
    }

    // Sensor dropout: no row, no retry until the next interval.
    let mut dropout = ScriptedSensors {
        temperature: None,
        air_humidity: Some(NOMINAL_HUMIDITY_PCT),
        soil_raw: NOMINAL_SOIL_RAW,
    };
    let rows_before = data_rows(&store).len();
    assert_eq!(
        monitor.tick(8 * INTERVAL_MS, &mut dropout, &mut store),
        TickOutcome::Skipped(SkipReason::SensorRead)
    );
    assert_eq!(data_rows(&store).len(), rows_before);

    // Heat spike on the next interval: flagged against the calm window.
    let mut spiking = ScriptedSensors {
        temperature: Some(SPIKE_TEMP_C),
        air_humidity: Some(NOMINAL_HUMIDITY_PCT),
        soil_raw: NOMINAL_SOIL_RAW,
    };
    assert_eq!(
        monitor.tick(9 * INTERVAL_MS, &mut spiking, &mut store),
        TickOutcome::Logged
    );

    let rows = data_rows(&store);
    let spike_row = rows.last().unwrap();
    let fields: Vec<&str> = spike_row.split(',').collect();

    // Temperature block: raw value, then OutT = SIM.
    assert_eq!(fields[9], "60.00");
    assert_eq!(fields[15], "SIM");
    // Air humidity stayed calm.
    assert_eq!(fields[8], "NAO");
}

#[cfg(feature = "store-file")]
#[test]
fn file_store_end_to_end() {
    use agromon_core::store::FileStore;

    let dir = tempfile::tempdir().unwrap();
    let mut monitor = scenario_monitor();
    let mut store = FileStore::new(dir.path().join("DADOS.CSV"));
    let mut sensors = ScriptedSensors::nominal();

    for i in 0..3u64 {
        assert_eq!(
            monitor.tick(i * INTERVAL_MS, &mut sensors, &mut store),
            TickOutcome::Logged
        );
    }

    let contents = std::fs::read_to_string(store.path()).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 6); // 3 header lines + 3 rows
    assert_eq!(lines[0], CSV_HEADER);
    assert!(lines[3].starts_with("2025-04-29,13:20:00,"));
}
