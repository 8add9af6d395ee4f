//! Simulated field run of the AgroMon statistics core.
//!
//! Drives the monitor with a synthetic greenhouse afternoon: slow
//! climate drift, one sensor dropout, and one heat spike. Prints the
//! CSV the device would append to its card.
//!
//! Run with:
//! ```sh
//! cargo run --example 01_field_monitor
//! ```

use agromon_core::{store::MemoryStore, Monitor, SensorSource, SyntheticClock, TickOutcome};

struct SimulatedProbes {
    tick: u32,
}

impl SensorSource for SimulatedProbes {
    fn read_temperature(&mut self) -> Option<f32> {
        match self.tick {
            // DHT read glitch mid-run.
            14 => None,
            // Heater left on.
            20 => Some(41.0),
            t => Some(21.0 + (t % 6) as f32 * 0.4),
        }
    }

    fn read_air_humidity(&mut self) -> Option<f32> {
        Some(58.0 - (self.tick % 9) as f32 * 0.7)
    }

    fn read_soil_raw(&mut self) -> u16 {
        // Slowly drying bed.
        550 + (self.tick * 4) as u16
    }
}

fn main() {
    let interval_ms = 60_000;
    let mut monitor = Monitor::<8, 12>::new()
        .with_interval(interval_ms)
        .with_clock(SyntheticClock::new(2025, 4, 29, 13, 20));
    let mut probes = SimulatedProbes { tick: 0 };
    let mut store: MemoryStore<64> = MemoryStore::new();

    for tick in 0..30u64 {
        probes.tick = tick as u32;
        let outcome = monitor.tick(tick * interval_ms, &mut probes, &mut store);
        if outcome != TickOutcome::Logged {
            eprintln!("tick {tick}: {outcome:?}");
        }
    }

    for line in store.lines() {
        println!("{line}");
    }
}
