//! Ownership of the selected location and its two data channels.
//!
//! Every `select` issues a new generation. Results are committed only when
//! their generation is still the current one and a selection is active, so a
//! slow response for an earlier selection can never overwrite a later one.

use tracing::{debug, warn};

use crate::{
    fetcher::FetchError,
    model::{ForecastSignal, Location, Measurement},
};

/// State of one data channel for the active selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Channel<T> {
    /// Request issued, no result yet.
    Pending,
    /// Request resolved: `Some` on success, `None` on failure.
    Ready(Option<T>),
}

impl<T> Channel<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Channel::Pending)
    }

    /// Resolved data, if any. Pending and failed channels both yield `None`.
    pub fn value(&self) -> Option<&T> {
        match self {
            Channel::Ready(v) => v.as_ref(),
            Channel::Pending => None,
        }
    }

    fn resolve(result: Result<T, FetchError>) -> Self {
        Channel::Ready(result.ok())
    }
}

/// Coordinates and generation a pair of fetches is issued for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRequest {
    pub lat: f64,
    pub lon: f64,
    pub generation: u64,
}

#[derive(Debug, Clone)]
struct ActiveSelection {
    location: Location,
    measurement: Channel<Measurement>,
    forecast: Channel<ForecastSignal>,
}

#[derive(Debug, Default)]
pub struct SelectionController {
    /// Highest generation ever issued. Never decreases.
    generation: u64,
    active: Option<ActiveSelection>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn location(&self) -> Option<&Location> {
        self.active.as_ref().map(|a| &a.location)
    }

    pub fn measurement(&self) -> Option<&Channel<Measurement>> {
        self.active.as_ref().map(|a| &a.measurement)
    }

    pub fn forecast(&self) -> Option<&Channel<ForecastSignal>> {
        self.active.as_ref().map(|a| &a.forecast)
    }

    /// Make `location` the active selection and return the request both
    /// fetches must be tagged with.
    pub fn select(&mut self, location: Location) -> SelectionRequest {
        self.generation += 1;
        let request = SelectionRequest {
            lat: location.lat,
            lon: location.lon,
            generation: self.generation,
        };
        debug!(generation = request.generation, location = %location.name, "selected");

        self.active = Some(ActiveSelection {
            location,
            measurement: Channel::Pending,
            forecast: Channel::Pending,
        });
        request
    }

    /// Drop the active selection. The generation counter is kept.
    pub fn deselect(&mut self) {
        if let Some(active) = self.active.take() {
            debug!(generation = self.generation, location = %active.location.name, "deselected");
        }
    }

    fn current_mut(&mut self, generation: u64, channel: &'static str) -> Option<&mut ActiveSelection> {
        if generation != self.generation {
            debug!(generation, current = self.generation, channel, "discarding stale result");
            return None;
        }
        if self.active.is_none() {
            debug!(generation, channel, "discarding result for cleared selection");
        }
        self.active.as_mut()
    }

    /// Store a data-channel result. Returns whether it was committed.
    pub fn commit_measurement(
        &mut self,
        generation: u64,
        result: Result<Measurement, FetchError>,
    ) -> bool {
        let Some(active) = self.current_mut(generation, "data") else {
            return false;
        };
        if let Err(e) = &result {
            warn!(generation, error = %e, "no measurement, falling back to baseline");
        }
        active.measurement = Channel::resolve(result);
        true
    }

    /// Store a forecast-channel result. Returns whether it was committed.
    pub fn commit_forecast(
        &mut self,
        generation: u64,
        result: Result<ForecastSignal, FetchError>,
    ) -> bool {
        let Some(active) = self.current_mut(generation, "forecast") else {
            return false;
        };
        if let Err(e) = &result {
            warn!(generation, error = %e, "no forecast signal, synthesizing from anchor");
        }
        active.forecast = Channel::resolve(result);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norway() -> Location {
        Location::new("Norway", 60.472, 8.4689, 25)
    }

    fn japan() -> Location {
        Location::new("Japan", 36.2048, 138.2529, 55)
    }

    fn measurement(aqi: u32) -> Measurement {
        Measurement { aqi: Some(f64::from(aqi)), ..Default::default() }
    }

    fn failed() -> FetchError {
        FetchError::new("data", "boom")
    }

    #[test]
    fn select_issues_increasing_generations_and_pending_channels() {
        let mut ctl = SelectionController::new();
        let a = ctl.select(norway());
        let b = ctl.select(japan());

        assert_eq!(a.generation, 1);
        assert_eq!(b.generation, 2);
        assert_eq!((b.lat, b.lon), (36.2048, 138.2529));
        assert_eq!(ctl.location(), Some(&japan()));
        assert!(ctl.measurement().unwrap().is_pending());
        assert!(ctl.forecast().unwrap().is_pending());
    }

    #[test]
    fn channels_commit_independently() {
        let mut ctl = SelectionController::new();
        let req = ctl.select(norway());

        assert!(ctl.commit_forecast(req.generation, Err(FetchError::new("forecast", "503"))));
        assert_eq!(ctl.forecast(), Some(&Channel::Ready(None)));
        assert!(ctl.measurement().unwrap().is_pending());

        assert!(ctl.commit_measurement(req.generation, Ok(measurement(40))));
        assert_eq!(ctl.measurement().unwrap().value(), Some(&measurement(40)));
        assert_eq!(ctl.forecast(), Some(&Channel::Ready(None)));
    }

    #[test]
    fn stale_results_are_discarded_in_any_order() {
        let mut ctl = SelectionController::new();
        let a = ctl.select(norway());
        let b = ctl.select(japan());

        assert!(ctl.commit_measurement(b.generation, Ok(measurement(55))));
        assert!(!ctl.commit_measurement(a.generation, Ok(measurement(25))));
        assert!(!ctl.commit_forecast(a.generation, Ok(ForecastSignal::default())));

        assert_eq!(ctl.measurement().unwrap().value(), Some(&measurement(55)));
        assert!(ctl.forecast().unwrap().is_pending());
    }

    #[test]
    fn stale_failure_does_not_clear_current_data() {
        let mut ctl = SelectionController::new();
        let a = ctl.select(norway());
        let b = ctl.select(japan());

        assert!(ctl.commit_measurement(b.generation, Ok(measurement(55))));
        assert!(!ctl.commit_measurement(a.generation, Err(failed())));
        assert_eq!(ctl.measurement().unwrap().value(), Some(&measurement(55)));
    }

    #[test]
    fn deselect_keeps_generation_and_rejects_late_results() {
        let mut ctl = SelectionController::new();
        let a = ctl.select(norway());
        ctl.deselect();

        assert_eq!(ctl.generation(), 1);
        assert!(ctl.location().is_none());
        assert!(!ctl.commit_measurement(a.generation, Ok(measurement(25))));
        assert!(ctl.measurement().is_none());

        let b = ctl.select(norway());
        assert_eq!(b.generation, 2);
        assert!(!ctl.commit_measurement(a.generation, Ok(measurement(99))));
        assert!(ctl.measurement().unwrap().is_pending());
    }

    #[test]
    fn reselecting_clears_previous_results() {
        let mut ctl = SelectionController::new();
        let a = ctl.select(norway());
        ctl.commit_measurement(a.generation, Ok(measurement(40)));

        ctl.select(norway());
        assert!(ctl.measurement().unwrap().is_pending());
    }
}
