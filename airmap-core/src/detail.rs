use serde::Serialize;

use crate::{
    forecast::{self, FORECAST_DAYS},
    model::{AQI_MAX, AQI_MIN, AqiBand, ForecastPoint, Location, Measurement, PollutantEntry},
    pollutant,
    selection::SelectionController,
};

/// Everything the detail page needs, derived fresh from controller state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailViewModel {
    pub location: Location,
    pub current_aqi: u32,
    pub current_band: AqiBand,
    pub pollutants: [PollutantEntry; 6],
    pub forecast: [ForecastPoint; FORECAST_DAYS],
    pub forecast_tip: Option<String>,
    /// Air temperature in °C, when the data channel reported it.
    pub temperature: Option<f64>,
    /// Wind speed in m/s, when the data channel reported it.
    pub wind_speed: Option<f64>,
    pub measurement_pending: bool,
    pub forecast_pending: bool,
}

impl DetailViewModel {
    /// `None` when nothing is selected.
    pub fn derive(selection: &SelectionController) -> Option<Self> {
        let location = selection.location()?;
        let measurement_channel = selection.measurement()?;
        let forecast_channel = selection.forecast()?;

        let measurement: Option<&Measurement> = measurement_channel.value();
        let signal = forecast_channel.value();

        let current_aqi = measurement
            .and_then(|m| m.aqi)
            .filter(|a| a.is_finite())
            // clamped to the AQI scale, so the cast cannot truncate
            .map(|a| a.round().clamp(AQI_MIN, AQI_MAX) as u32)
            .unwrap_or(location.baseline_aqi);
        let anchor = f64::from(current_aqi);

        Some(Self {
            location: location.clone(),
            current_aqi,
            current_band: AqiBand::classify(anchor),
            pollutants: pollutant::derive(measurement),
            forecast: forecast::synthesize(anchor, signal),
            forecast_tip: signal.and_then(|s| s.tip.clone()),
            temperature: measurement.and_then(|m| m.temp),
            wind_speed: measurement.and_then(|m| m.wind),
            measurement_pending: measurement_channel.is_pending(),
            forecast_pending: forecast_channel.is_pending(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fetcher::FetchError,
        model::{ForecastSignal, Level},
    };

    fn norway() -> Location {
        Location::new("Norway", 60.472, 8.4689, 25)
    }

    fn aqi_values(view: &DetailViewModel) -> Vec<f64> {
        view.forecast.iter().map(|p| p.aqi).collect()
    }

    #[test]
    fn nothing_selected() {
        assert!(DetailViewModel::derive(&SelectionController::new()).is_none());
    }

    #[test]
    fn pending_selection_uses_fallbacks() {
        let mut ctl = SelectionController::new();
        ctl.select(norway());

        let view = DetailViewModel::derive(&ctl).expect("selection active");
        assert!(view.measurement_pending);
        assert!(view.forecast_pending);
        assert_eq!(view.current_aqi, 25);
        assert_eq!(aqi_values(&view), vec![25.0, 32.0, 22.0, 35.0, 17.0]);
    }

    #[test]
    fn both_fetches_failed() {
        let mut ctl = SelectionController::new();
        let req = ctl.select(norway());
        ctl.commit_measurement(req.generation, Err(FetchError::new("data", "timeout")));
        ctl.commit_forecast(req.generation, Err(FetchError::new("forecast", "timeout")));

        let view = DetailViewModel::derive(&ctl).expect("selection active");
        assert!(!view.measurement_pending);
        assert!(!view.forecast_pending);
        assert_eq!(view.current_aqi, 25);
        assert_eq!(view.current_band, AqiBand::Good);
        assert_eq!(aqi_values(&view), vec![25.0, 32.0, 22.0, 35.0, 17.0]);
        assert_eq!(view.pollutants, pollutant::derive(None));
        assert_eq!(view.forecast_tip, None);
    }

    #[test]
    fn both_fetches_succeeded() {
        let mut ctl = SelectionController::new();
        let req = ctl.select(norway());
        ctl.commit_measurement(
            req.generation,
            Ok(Measurement { aqi: Some(40.0), pm25: Some(10.0), ..Default::default() }),
        );
        ctl.commit_forecast(
            req.generation,
            Ok(ForecastSignal { tomorrow_aqi: Some(50.0), tip: Some("wear a mask".into()) }),
        );

        let view = DetailViewModel::derive(&ctl).expect("selection active");
        assert_eq!(view.current_aqi, 40);
        assert_eq!(view.forecast[0].aqi, 40.0);
        assert_eq!(view.forecast[1].aqi, 50.0);
        assert_eq!(view.forecast[2].aqi, 45.0);
        assert_eq!(view.pollutants[0].name, "PM2.5");
        assert_eq!(view.pollutants[0].value, "10.0");
        assert_eq!(view.pollutants[0].level, Level::Good);
        assert_eq!(view.forecast_tip.as_deref(), Some("wear a mask"));
    }

    #[test]
    fn fractional_and_out_of_scale_aqi_is_rounded_into_range() {
        let current = |aqi: f64| {
            let mut ctl = SelectionController::new();
            let req = ctl.select(norway());
            ctl.commit_measurement(req.generation, Ok(Measurement { aqi: Some(aqi), ..Default::default() }));
            DetailViewModel::derive(&ctl).expect("selection active").current_aqi
        };

        assert_eq!(current(42.5), 43);
        assert_eq!(current(42.4), 42);
        assert_eq!(current(-3.0), 0);
        assert_eq!(current(512.0), 300);
        assert_eq!(current(f64::NAN), 25);
    }

    #[test]
    fn measurement_without_aqi_keeps_baseline() {
        let mut ctl = SelectionController::new();
        let req = ctl.select(norway());
        ctl.commit_measurement(
            req.generation,
            Ok(Measurement { pm25: Some(40.0), temp: Some(4.5), wind: Some(3.0), ..Default::default() }),
        );

        let view = DetailViewModel::derive(&ctl).expect("selection active");
        assert_eq!(view.current_aqi, 25);
        assert_eq!(view.pollutants[0].level, Level::Unhealthy);
        assert_eq!(view.temperature, Some(4.5));
        assert_eq!(view.wind_speed, Some(3.0));
        assert!(view.forecast_pending);
    }
}
