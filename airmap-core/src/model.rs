use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of the AQI scale used throughout the crate.
pub const AQI_MIN: f64 = 0.0;
/// Upper bound of the AQI scale used throughout the crate.
pub const AQI_MAX: f64 = 300.0;

/// A selectable place on the map. Identity is the name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(alias = "avg_aqi")]
    pub baseline_aqi: u32,
}

impl Location {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64, baseline_aqi: u32) -> Self {
        Self { name: name.into(), lat, lon, baseline_aqi }
    }
}

/// Point-in-time readings returned by the data endpoint.
///
/// Every field is optional: the endpoint may omit any of them and the
/// derivation layer falls back to static values for whatever is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Any JSON number; rounded when used as the headline value.
    #[serde(default)]
    pub aqi: Option<f64>,
    #[serde(default)]
    pub pm25: Option<f64>,
    /// Tropospheric column density in molecules/cm².
    #[serde(default)]
    pub no2: Option<f64>,
    /// Air temperature in °C.
    #[serde(default)]
    pub temp: Option<f64>,
    /// Wind speed in m/s.
    #[serde(default)]
    pub wind: Option<f64>,
}

/// Next-day prediction returned by the forecast endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSignal {
    #[serde(default)]
    pub tomorrow_aqi: Option<f64>,
    #[serde(default)]
    pub tip: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↗",
            Trend::Down => "↘",
            Trend::Stable => "→",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Days from today; 0 is today.
    pub day_offset: u8,
    pub aqi: f64,
    pub trend: Trend,
}

impl ForecastPoint {
    /// Calendar date of this point relative to `today`.
    pub fn date(&self, today: NaiveDate) -> NaiveDate {
        today.checked_add_days(Days::new(u64::from(self.day_offset))).unwrap_or(today)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Level {
    Good,
    Moderate,
    Unhealthy,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Good => "Good",
            Level::Moderate => "Moderate",
            Level::Unhealthy => "Unhealthy",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Level::Good => Color::Green,
            Level::Moderate => Color::Orange,
            Level::Unhealthy => Color::Red,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Palette token handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Color {
    Green,
    Orange,
    Red,
    Purple,
}

impl Color {
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Green => "#66BB6A",
            Color::Orange => "#FFA726",
            Color::Red => "#EF5350",
            Color::Purple => "#7B1FA2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantEntry {
    pub name: &'static str,
    pub value: String,
    pub level: Level,
    pub color: Color,
}

/// Headline category for a single AQI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AqiBand {
    Good,
    Moderate,
    Unhealthy,
    Hazardous,
}

impl AqiBand {
    pub fn classify(aqi: f64) -> Self {
        if aqi <= 50.0 {
            AqiBand::Good
        } else if aqi <= 100.0 {
            AqiBand::Moderate
        } else if aqi <= 150.0 {
            AqiBand::Unhealthy
        } else {
            AqiBand::Hazardous
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AqiBand::Good => "Good",
            AqiBand::Moderate => "Moderate",
            AqiBand::Unhealthy => "Unhealthy",
            AqiBand::Hazardous => "Hazardous",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            AqiBand::Good => Color::Green,
            AqiBand::Moderate => Color::Orange,
            AqiBand::Unhealthy => Color::Red,
            AqiBand::Hazardous => Color::Purple,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            AqiBand::Good => "😊",
            AqiBand::Moderate => "😐",
            AqiBand::Unhealthy => "😷",
            AqiBand::Hazardous => "☠️",
        }
    }
}

/// Emoji shown next to a location's baseline AQI on the map.
pub fn marker_emoji(aqi: f64) -> &'static str {
    match aqi {
        a if a <= 50.0 => "🌱",
        a if a <= 100.0 => "😵‍💫",
        a if a <= 150.0 => "🤯",
        a if a <= 200.0 => "⚠️",
        a if a <= 300.0 => "☣️",
        _ => "☠️",
    }
}

/// Audience the forecast tip is tailored for; sent as the forecast `category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HealthProfile {
    #[default]
    General,
    Athlete,
    Asthma,
    Pregnant,
    Child,
    Elderly,
}

impl HealthProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthProfile::General => "general",
            HealthProfile::Athlete => "athlete",
            HealthProfile::Asthma => "asthma",
            HealthProfile::Pregnant => "pregnant",
            HealthProfile::Child => "child",
            HealthProfile::Elderly => "elderly",
        }
    }

    pub const fn all() -> &'static [HealthProfile] {
        &[
            HealthProfile::General,
            HealthProfile::Athlete,
            HealthProfile::Asthma,
            HealthProfile::Pregnant,
            HealthProfile::Child,
            HealthProfile::Elderly,
        ]
    }
}

impl fmt::Display for HealthProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for HealthProfile {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        HealthProfile::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown profile '{value}'. Supported profiles: \
                     general, athlete, asthma, pregnant, child, elderly."
                )
            })
    }
}
