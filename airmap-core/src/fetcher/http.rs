use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::model::{ForecastSignal, HealthProfile, Measurement};

use super::{DataFetcher, FetchError};

/// Fetcher backed by the data and forecast HTTP APIs.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
    data_url: Url,
    forecast_url: Url,
}

impl HttpFetcher {
    pub fn new(data_api_base: &str, forecast_api_base: &str, timeout: Duration) -> Result<Self> {
        let data_url = endpoint_url(data_api_base, "api/data")
            .with_context(|| format!("Invalid data API base URL: {data_api_base}"))?;
        let forecast_url = endpoint_url(forecast_api_base, "api/forecast")
            .with_context(|| format!("Invalid forecast API base URL: {forecast_api_base}"))?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, data_url, forecast_url })
    }

    pub fn data_url(&self) -> &Url {
        &self.data_url
    }

    pub fn forecast_url(&self) -> &Url {
        &self.forecast_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &Url,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        debug!(endpoint, %url, ?query, "sending request");

        let res = self
            .http
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::new(endpoint, format!("transport error: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::new(endpoint, format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(FetchError::new(
                endpoint,
                format!("status {status}: {}", truncate_body(&body)),
            ));
        }

        serde_json::from_str(&body)
            .map_err(|e| FetchError::new(endpoint, format!("malformed JSON: {e}")))
    }
}

#[async_trait]
impl DataFetcher for HttpFetcher {
    async fn fetch_current(&self, lat: f64, lon: f64) -> Result<Measurement, FetchError> {
        self.get_json(
            "data",
            &self.data_url,
            &[("lat", lat.to_string()), ("lon", lon.to_string())],
        )
        .await
    }

    async fn fetch_forecast(
        &self,
        lat: f64,
        lon: f64,
        category: HealthProfile,
    ) -> Result<ForecastSignal, FetchError> {
        self.get_json(
            "forecast",
            &self.forecast_url,
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("category", category.as_str().to_string()),
            ],
        )
        .await
    }
}

fn endpoint_url(base: &str, path: &str) -> Result<Url> {
    let url = Url::parse(&format!("{}/{path}", base.trim().trim_end_matches('/')))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("unsupported scheme '{}'", url.scheme());
    }
    Ok(url)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
