use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};

use crate::model::Forecast;

const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches current conditions for a coordinate pair.
///
/// Coordinates are strings because the postal lookup reports them as
/// strings; they are passed through to the weather service unparsed.
#[async_trait]
pub trait WeatherLookup: Send + Sync + Debug {
    async fn current(&self, latitude: &str, longitude: &str) -> Result<Forecast>;
}

/// Weather lookup backed by the Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: String,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different base URL, e.g. a local test server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherLookup for OpenMeteoClient {
    async fn current(&self, latitude: &str, longitude: &str) -> Result<Forecast> {
        let url = format!("{}/v1/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude),
                ("longitude", longitude),
                ("current", "temperature_2m"),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .context("Failed to send request to Open-Meteo (current weather)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo current request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: Forecast =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo JSON")?;

        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // Back off to a char boundary; upstream error bodies carry
        // multibyte Portuguese text.
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
