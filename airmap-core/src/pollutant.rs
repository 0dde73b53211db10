//! Per-pollutant breakdown for the detail view.
//!
//! The six pollutants are always reported in a fixed order. Only PM2.5 and NO2
//! are backed by the data endpoint; the rest, and any field the endpoint did
//! not return, show the static placeholder from [`POLLUTANTS`].

use crate::model::{Level, Measurement, PollutantEntry};

/// NO2 arrives as a column density (molecules/cm²) and is shown in units of 1e14.
pub const NO2_DISPLAY_SCALE: f64 = 1e14;

#[derive(Debug, Clone, Copy)]
struct Placeholder {
    value: &'static str,
    level: Level,
}

#[derive(Debug, Clone, Copy)]
enum Source {
    Pm25,
    No2,
    Static,
}

#[derive(Debug, Clone, Copy)]
struct Pollutant {
    name: &'static str,
    source: Source,
    placeholder: Placeholder,
}

const POLLUTANTS: [Pollutant; 6] = [
    Pollutant {
        name: "PM2.5",
        source: Source::Pm25,
        placeholder: Placeholder { value: "12.3", level: Level::Unhealthy },
    },
    Pollutant {
        name: "PM10",
        source: Source::Static,
        placeholder: Placeholder { value: "23.1", level: Level::Good },
    },
    Pollutant {
        name: "NO2",
        source: Source::No2,
        placeholder: Placeholder { value: "18.7", level: Level::Moderate },
    },
    Pollutant {
        name: "O3",
        source: Source::Static,
        placeholder: Placeholder { value: "45.2", level: Level::Unhealthy },
    },
    Pollutant {
        name: "SO2",
        source: Source::Static,
        placeholder: Placeholder { value: "2.1", level: Level::Good },
    },
    Pollutant {
        name: "CO",
        source: Source::Static,
        placeholder: Placeholder { value: "0.8", level: Level::Good },
    },
];

fn classify_pm25(ugm3: f64) -> Level {
    if ugm3 <= 12.0 {
        Level::Good
    } else if ugm3 <= 35.4 {
        Level::Moderate
    } else {
        Level::Unhealthy
    }
}

fn classify_no2(column: f64) -> Level {
    if column <= 2e15 { Level::Good } else { Level::Moderate }
}

impl Pollutant {
    fn reading(&self, measurement: Option<&Measurement>) -> Option<(String, Level)> {
        let m = measurement?;
        let (display, level) = match self.source {
            Source::Pm25 => {
                let raw = m.pm25.filter(|v| v.is_finite())?;
                (raw, classify_pm25(raw))
            }
            Source::No2 => {
                let raw = m.no2.filter(|v| v.is_finite())?;
                (raw / NO2_DISPLAY_SCALE, classify_no2(raw))
            }
            Source::Static => return None,
        };
        Some((format!("{display:.1}"), level))
    }

    fn entry(&self, measurement: Option<&Measurement>) -> PollutantEntry {
        let (value, level) = self
            .reading(measurement)
            .unwrap_or_else(|| (self.placeholder.value.to_string(), self.placeholder.level));

        PollutantEntry { name: self.name, value, level, color: level.color() }
    }
}

/// Derive all six entries from whatever readings are available.
pub fn derive(measurement: Option<&Measurement>) -> [PollutantEntry; 6] {
    POLLUTANTS.map(|p| p.entry(measurement))
}
