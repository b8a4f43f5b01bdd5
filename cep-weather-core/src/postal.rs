use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};

use crate::model::PostalAddress;

const DEFAULT_BASE_URL: &str = "https://cep.awesomeapi.com.br";

/// Per-request deadline for the outbound call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves a postal code to an address record with coordinates.
#[async_trait]
pub trait PostalLookup: Send + Sync + Debug {
    async fn lookup(&self, cep: &str) -> Result<PostalAddress>;
}

/// Postal lookup backed by the AwesomeAPI CEP service.
#[derive(Debug, Clone)]
pub struct AwesomeApiClient {
    base_url: String,
    http: Client,
}

impl AwesomeApiClient {
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

impl Default for AwesomeApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostalLookup for AwesomeApiClient {
    async fn lookup(&self, cep: &str) -> Result<PostalAddress> {
        let url = format!("{}/json/{}", self.base_url, cep);

        let res = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .context("Failed to send request to AwesomeAPI CEP lookup")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read AwesomeAPI CEP response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "AwesomeAPI CEP request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: PostalAddress =
            serde_json::from_str(&body).context("Failed to parse AwesomeAPI CEP JSON")?;

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

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug)]
    struct CannedLookup;

    #[async_trait]
    impl PostalLookup for CannedLookup {
        async fn lookup(&self, cep: &str) -> Result<PostalAddress> {
            Ok(PostalAddress {
                cep: cep.to_string(),
                latitude: "-23.5505".to_string(),
                longitude: "-46.6333".to_string(),
                ..PostalAddress::default()
            })
        }
    }

    #[tokio::test]
    async fn lookup_dispatches_through_trait_object() {
        let client: Box<dyn PostalLookup> = Box::new(CannedLookup);
        let address = client.lookup("01310100").await.expect("canned lookup");

        assert_eq!(address.cep, "01310100");
        assert_eq!(address.latitude, "-23.5505");
    }

    #[test]
    fn truncate_body_caps_long_payloads() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));

        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_backs_off_to_char_boundary() {
        // A multibyte character straddling the cap must not split.
        let body = format!("{}ãããã", "x".repeat(199));
        let truncated = truncate_body(&body);
        assert_eq!(truncated, format!("{}...", "x".repeat(199)));
    }

    #[tokio::test]
    async fn lookup_decodes_awesomeapi_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json/01310100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cep": "01310100",
                "lat": "-23.5505",
                "lng": "-46.6333",
                "city": "São Paulo",
                "state": "SP"
            })))
            .mount(&mock_server)
            .await;

        let client = AwesomeApiClient::with_base_url(mock_server.uri());
        let address = client.lookup("01310100").await.expect("lookup");

        assert_eq!(address.cep, "01310100");
        assert_eq!(address.latitude, "-23.5505");
        assert_eq!(address.longitude, "-46.6333");
    }

    #[tokio::test]
    async fn lookup_fails_on_non_2xx_status() {
        let mock_server = MockServer::start().await;

        // Long multibyte body exercising truncation on the error path.
        let body = format!("CEP não encontrado {}ãããã", "x".repeat(179));
        Mock::given(method("GET"))
            .and(path("/json/00000000"))
            .respond_with(ResponseTemplate::new(404).set_body_string(body))
            .mount(&mock_server)
            .await;

        let client = AwesomeApiClient::with_base_url(mock_server.uri());
        let err = client.lookup("00000000").await.unwrap_err();

        assert!(err.to_string().contains("failed with status 404"));
    }

    #[tokio::test]
    async fn lookup_fails_on_malformed_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json/01310100"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = AwesomeApiClient::with_base_url(mock_server.uri());
        let err = client.lookup("01310100").await.unwrap_err();

        assert!(
            err.to_string()
                .contains("Failed to parse AwesomeAPI CEP JSON")
        );
    }
}
