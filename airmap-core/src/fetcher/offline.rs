use async_trait::async_trait;

use crate::model::{ForecastSignal, HealthProfile, Measurement};

use super::{DataFetcher, FetchError};

/// Fetcher that fails every call, leaving the view fully synthetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineFetcher;

#[async_trait]
impl DataFetcher for OfflineFetcher {
    async fn fetch_current(&self, _lat: f64, _lon: f64) -> Result<Measurement, FetchError> {
        Err(FetchError::new("data", "offline mode"))
    }

    async fn fetch_forecast(
        &self,
        _lat: f64,
        _lon: f64,
        _category: HealthProfile,
    ) -> Result<ForecastSignal, FetchError> {
        Err(FetchError::new("forecast", "offline mode"))
    }
}
