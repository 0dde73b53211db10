//! The map as seen by a renderer: camera commands, selection commands and
//! read access to the current viewport and detail view.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::{
    catalog::LocationCatalog,
    detail::DetailViewModel,
    fetcher::DataFetcher,
    model::{HealthProfile, Location},
    selection::SelectionController,
    viewport::{LatLon, Viewport, ViewportController},
};

#[derive(Debug)]
pub struct AirQualityMap {
    catalog: LocationCatalog,
    profile: HealthProfile,
    fetcher: Arc<dyn DataFetcher>,
    viewport: Mutex<ViewportController>,
    selection: Arc<Mutex<SelectionController>>,
}

/// Handle on the two fetches issued by one selection.
///
/// Dropping it does not cancel anything; the fetches still run and their
/// results are still subject to the generation check.
#[derive(Debug)]
pub struct SelectionTask {
    generation: u64,
    measurement: JoinHandle<()>,
    forecast: JoinHandle<()>,
}

impl SelectionTask {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait until both channels have resolved (committed or discarded).
    pub async fn settled(self) {
        let (measurement, forecast) = tokio::join!(self.measurement, self.forecast);
        for (channel, joined) in [("data", measurement), ("forecast", forecast)] {
            if let Err(e) = joined {
                warn!(generation = self.generation, channel, error = %e, "fetch task did not complete");
            }
        }
    }
}

impl AirQualityMap {
    pub fn new(catalog: LocationCatalog, fetcher: Arc<dyn DataFetcher>, profile: HealthProfile) -> Self {
        Self {
            catalog,
            profile,
            fetcher,
            viewport: Mutex::new(ViewportController::new()),
            selection: Arc::new(Mutex::new(SelectionController::new())),
        }
    }

    pub fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    pub fn profile(&self) -> HealthProfile {
        self.profile
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.lock().viewport()
    }

    /// Current detail view, or `None` when nothing is selected.
    pub fn detail(&self) -> Option<DetailViewModel> {
        DetailViewModel::derive(&self.selection.lock())
    }

    /// Select `location` and fire both fetches on the current tokio runtime.
    ///
    /// Must be called from within a runtime context.
    pub fn select_location(&self, location: Location) -> SelectionTask {
        let request = self.selection.lock().select(location);
        let generation = request.generation;

        let measurement = {
            let fetcher = Arc::clone(&self.fetcher);
            let selection = Arc::clone(&self.selection);
            tokio::spawn(async move {
                let result = fetcher.fetch_current(request.lat, request.lon).await;
                selection.lock().commit_measurement(generation, result);
            })
        };

        let forecast = {
            let fetcher = Arc::clone(&self.fetcher);
            let selection = Arc::clone(&self.selection);
            let category = self.profile;
            tokio::spawn(async move {
                let result = fetcher.fetch_forecast(request.lat, request.lon, category).await;
                selection.lock().commit_forecast(generation, result);
            })
        };

        SelectionTask { generation, measurement, forecast }
    }

    pub fn deselect_location(&self) {
        self.selection.lock().deselect();
    }

    pub fn zoom_in(&self) {
        self.viewport.lock().zoom_in();
    }

    pub fn zoom_out(&self) {
        self.viewport.lock().zoom_out();
    }

    pub fn reset_view(&self) {
        self.viewport.lock().reset();
    }

    /// Camera state reported by the map after a drag or pinch.
    pub fn set_view(&self, center: LatLon, zoom: u8) {
        self.viewport.lock().set_view(center, zoom);
    }
}
