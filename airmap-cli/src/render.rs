use airmap_core::{DetailViewModel, HealthProfile, Location, LocationCatalog, Viewport, model::marker_emoji};
use chrono::{Local, NaiveDate};
use std::fmt::Write;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn marker_label(location: &Location) -> String {
    let aqi = f64::from(location.baseline_aqi);
    format!("{} (AQI {} {})", location.name, location.baseline_aqi, marker_emoji(aqi))
}

pub fn catalog(catalog: &LocationCatalog) -> String {
    let mut out = String::new();
    for loc in catalog.iter() {
        let _ = writeln!(
            out,
            "{:<16} {:>8.4} {:>9.4}  AQI {:>3} {}",
            loc.name,
            loc.lat,
            loc.lon,
            loc.baseline_aqi,
            marker_emoji(f64::from(loc.baseline_aqi)),
        );
    }
    out
}

pub fn viewport(viewport: &Viewport) -> String {
    let mut line = format!(
        "Map center ({:.3}, {:.3}), zoom {}",
        viewport.center.lat, viewport.center.lon, viewport.zoom
    );
    if viewport.is_world_view() {
        line.push_str(" (world view: zoom in and choose your city)");
    }
    line
}

pub fn detail(view: &DetailViewModel, profile: HealthProfile, today: NaiveDate) -> String {
    let mut out = String::new();

    let band = view.current_band;
    let _ = writeln!(
        out,
        "{}: AQI {} {} {}",
        view.location.name,
        view.current_aqi,
        band.as_str(),
        band.emoji()
    );

    if view.measurement_pending || view.forecast_pending {
        let _ = writeln!(out, "(still loading, showing estimates)");
    }

    match (view.temperature, view.wind_speed) {
        (Some(t), Some(w)) => {
            let _ = writeln!(out, "Weather: {t:.1}°C, wind {w:.1} m/s");
        }
        (Some(t), None) => {
            let _ = writeln!(out, "Weather: {t:.1}°C");
        }
        (None, Some(w)) => {
            let _ = writeln!(out, "Weather: wind {w:.1} m/s");
        }
        (None, None) => {}
    }

    let _ = writeln!(out, "\nPollutants");
    for p in &view.pollutants {
        let _ = writeln!(out, "  {:<6} {:>6}  {:<9} {}", p.name, p.value, p.level, p.color.hex());
    }

    let _ = writeln!(out, "\n5-day forecast");
    for point in &view.forecast {
        let date = point.date(today).format("%a, %b %-d");
        let _ = writeln!(out, "  {:<12} {:>5.0} {}", date.to_string(), point.aqi, point.trend.arrow());
    }

    if let Some(tip) = &view.forecast_tip {
        let _ = writeln!(out, "\nTip ({profile}): {tip}");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use airmap_core::{
        FetchError, Measurement, selection::SelectionController,
    };

    fn failed_norway() -> DetailViewModel {
        let mut ctl = SelectionController::new();
        let req = ctl.select(Location::new("Norway", 60.472, 8.4689, 25));
        ctl.commit_measurement(req.generation, Err(FetchError::new("data", "down")));
        ctl.commit_forecast(req.generation, Err(FetchError::new("forecast", "down")));
        DetailViewModel::derive(&ctl).expect("selection active")
    }

    #[test]
    fn detail_lists_pollutants_and_dated_forecast() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let text = detail(&failed_norway(), HealthProfile::General, today);

        assert!(text.starts_with("Norway: AQI 25 Good"));
        assert!(text.contains("PM2.5    12.3  Unhealthy #EF5350"));
        assert!(text.contains("NO2      18.7  Moderate  #FFA726"));
        assert!(text.contains("PM10     23.1  Good      #66BB6A"));
        assert!(text.contains("Fri, Oct 16"));
        assert!(text.contains("Tue, Oct 20"));
        assert!(!text.contains("still loading"));
        assert!(!text.contains("Tip"));
    }

    #[test]
    fn detail_shows_weather_when_present() {
        let mut ctl = SelectionController::new();
        let req = ctl.select(Location::new("Norway", 60.472, 8.4689, 25));
        ctl.commit_measurement(
            req.generation,
            Ok(Measurement { temp: Some(4.5), wind: Some(3.0), ..Default::default() }),
        );
        let view = DetailViewModel::derive(&ctl).expect("selection active");

        let text = detail(&view, HealthProfile::General, today());
        assert!(text.contains("Weather: 4.5°C, wind 3.0 m/s"));
        assert!(text.contains("still loading"));
    }

    #[test]
    fn viewport_flags_world_view() {
        assert!(viewport(&Viewport::default()).contains("world view"));
    }

    #[test]
    fn catalog_lists_every_location() {
        let text = catalog(&LocationCatalog::builtin());
        assert_eq!(text.lines().count(), 10);
        assert!(text.lines().next().unwrap().starts_with("Norway"));
    }
}
