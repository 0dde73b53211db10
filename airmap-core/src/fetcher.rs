use crate::{
    Config,
    fetcher::{http::HttpFetcher, offline::OfflineFetcher},
    model::{ForecastSignal, HealthProfile, Measurement},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};
use thiserror::Error;

pub mod http;
pub mod offline;

/// The remote call did not yield usable data.
///
/// Cause is recorded for logging only; callers treat every failure the same.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{endpoint} request failed: {detail}")]
pub struct FetchError {
    pub endpoint: &'static str,
    pub detail: String,
}

impl FetchError {
    pub fn new(endpoint: &'static str, detail: impl Into<String>) -> Self {
        Self { endpoint, detail: detail.into() }
    }
}

/// Source of the two independent data channels behind a selection.
#[async_trait]
pub trait DataFetcher: Send + Sync + Debug {
    async fn fetch_current(&self, lat: f64, lon: f64) -> Result<Measurement, FetchError>;

    async fn fetch_forecast(
        &self,
        lat: f64,
        lon: f64,
        category: HealthProfile,
    ) -> Result<ForecastSignal, FetchError>;
}

/// Construct the HTTP fetcher from config and the process environment.
pub fn fetcher_from_config(config: &Config) -> anyhow::Result<Arc<dyn DataFetcher>> {
    let endpoints = config.endpoints();
    let fetcher = HttpFetcher::new(&endpoints.data_api_base, &endpoints.forecast_api_base, config.timeout())?;
    Ok(Arc::new(fetcher))
}

/// Construct a fetcher that never reaches the network.
pub fn offline_fetcher() -> Arc<dyn DataFetcher> {
    Arc::new(OfflineFetcher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_display_names_endpoint() {
        let err = FetchError::new("forecast", "status 503");
        assert_eq!(err.to_string(), "forecast request failed: status 503");
    }

    #[test]
    fn fetcher_from_default_config_builds() {
        let cfg = Config::default();
        assert!(fetcher_from_config(&cfg).is_ok());
    }

    #[test]
    fn fetcher_from_config_rejects_bad_url() {
        let cfg = Config { data_api_base: Some("not a url".into()), ..Default::default() };
        // env vars take precedence, so only assert when they are absent
        if std::env::var_os(crate::config::DATA_API_ENV).is_none() {
            let err = fetcher_from_config(&cfg).unwrap_err();
            assert!(format!("{err:#}").contains("Invalid data API base URL"));
        }
    }
}
