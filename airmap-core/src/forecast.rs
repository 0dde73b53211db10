//! Five-day AQI series derived from today's anchor value and an optional
//! next-day prediction.
//!
//! Only "today" and, when available, "tomorrow" come from real data. The
//! remaining days follow a fixed offset pattern so the curve is stable across
//! renders.

use crate::model::{AQI_MAX, AQI_MIN, ForecastPoint, ForecastSignal, Trend};

pub const FORECAST_DAYS: usize = 5;

/// Offsets applied to the real next-day value for days 1..=4.
const SIGNAL_PATTERN: [(f64, Trend); 4] =
    [(0.0, Trend::Up), (-5.0, Trend::Down), (3.0, Trend::Up), (-8.0, Trend::Down)];

/// Offsets applied to today's value for days 1..=4 when no prediction exists.
const ANCHOR_PATTERN: [(f64, Trend); 4] =
    [(7.0, Trend::Up), (-3.0, Trend::Down), (10.0, Trend::Up), (-8.0, Trend::Down)];

fn clamp_aqi(value: f64) -> f64 {
    value.clamp(AQI_MIN, AQI_MAX)
}

/// Build the forecast series. Pure: identical inputs give identical output.
pub fn synthesize(anchor_aqi: f64, signal: Option<&ForecastSignal>) -> [ForecastPoint; FORECAST_DAYS] {
    let anchor = if anchor_aqi.is_finite() { clamp_aqi(anchor_aqi) } else { AQI_MIN };

    let tomorrow = signal.and_then(|s| s.tomorrow_aqi).filter(|t| t.is_finite());

    let (base, pattern) = match tomorrow {
        Some(t) => (clamp_aqi(t), &SIGNAL_PATTERN),
        None => (anchor, &ANCHOR_PATTERN),
    };

    let mut points = [ForecastPoint { day_offset: 0, aqi: anchor, trend: Trend::Stable }; FORECAST_DAYS];
    for (i, (offset, trend)) in pattern.iter().enumerate() {
        points[i + 1] = ForecastPoint {
            day_offset: (i + 1) as u8,
            aqi: clamp_aqi(base + offset),
            trend: *trend,
        };
    }
    points
}
