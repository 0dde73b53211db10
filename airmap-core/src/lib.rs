//! Core library for the `airmap` air quality explorer.
//!
//! This crate defines:
//! - Configuration & endpoint resolution
//! - The location catalog and map viewport state
//! - The data fetcher abstraction (HTTP and offline)
//! - Generation-guarded selection state and the derived detail view
//!
//! Rendering is left to the caller: `airmap-cli` prints the detail view, other
//! front ends can drive [`AirQualityMap`] the same way.

pub mod app;
pub mod catalog;
pub mod config;
pub mod detail;
pub mod fetcher;
pub mod forecast;
pub mod model;
pub mod pollutant;
pub mod selection;
pub mod viewport;

pub use app::{AirQualityMap, SelectionTask};
pub use catalog::LocationCatalog;
pub use config::{Config, Endpoints};
pub use detail::DetailViewModel;
pub use fetcher::{DataFetcher, FetchError, fetcher_from_config, offline_fetcher};
pub use model::{
    AqiBand, ForecastPoint, ForecastSignal, HealthProfile, Level, Location, Measurement,
    PollutantEntry, Trend,
};
pub use viewport::{LatLon, Viewport};
