//! SerpAPI Google Hotels client.
//!
//! One GET per call, bounded by a fixed total timeout. The credential is
//! checked before anything goes on the wire and is masked in every log line.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use hotel_core::{DetailsQuery, SearchQuery};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MASKED: &str = "***MASKED***";
const LOGGED_BODY_LIMIT: usize = 500;

#[derive(Debug, Error)]
pub enum SerpApiError {
    #[error("SerpAPI API key not configured. Please set SERPAPI_API_KEY environment variable.")]
    NotConfigured,

    #[error("SerpAPI request failed: {status}")]
    Http { status: u16, body: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON in SerpAPI response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct SerpApiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl SerpApiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, SerpApiError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Raw hotel search response; the caller picks `properties` out of it.
    pub async fn search_hotels(&self, query: &SearchQuery) -> Result<Value, SerpApiError> {
        self.get(query.query_pairs()).await
    }

    /// Raw property detail response, handed back unmodified.
    pub async fn hotel_details(&self, query: &DetailsQuery) -> Result<Value, SerpApiError> {
        self.get(query.query_pairs()).await
    }

    async fn get(&self, pairs: Vec<(&'static str, String)>) -> Result<Value, SerpApiError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            tracing::error!("SerpAPI API key not configured!");
            SerpApiError::NotConfigured
        })?;

        tracing::info!("SerpAPI Request URL: {}", self.base_url);
        tracing::info!("SerpAPI Request Params: {}", describe_params(&pairs));

        let response = self
            .http
            .get(&self.base_url)
            .query(&pairs)
            .query(&[("api_key", api_key)])
            .send()
            .await?;

        let status = response.status();
        tracing::info!("SerpAPI Response Status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("SerpAPI HTTP Error: {}", status.as_u16());
            tracing::error!("Response body: {}", truncate(&body, LOGGED_BODY_LIMIT));
            return Err(SerpApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let data: Value = serde_json::from_slice(&bytes)?;

        if let Some(obj) = data.as_object() {
            let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
            tracing::info!("SerpAPI Response Keys: {:?}", keys);
            if let Some(metadata) = obj.get("search_metadata") {
                tracing::debug!("Search Metadata: {}", metadata);
            }
        }

        Ok(data)
    }
}

/// Query parameters as they go out, credential included but masked.
fn describe_params(pairs: &[(&'static str, String)]) -> String {
    let mut shown: Vec<String> = pairs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    shown.push(format!("api_key={}", MASKED));
    shown.join("&")
}

fn truncate(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hotel_core::{DetailsParams, SearchParams};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn search_query(params: serde_json::Value) -> SearchQuery {
        let params: SearchParams = serde_json::from_value(params).unwrap();
        SearchQuery::from_params(params, today())
    }

    #[tokio::test]
    async fn test_search_sends_query_and_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("engine", "google_hotels"))
            .and(query_param("q", "Lisbon"))
            .and(query_param("check_in_date", "2025-06-02"))
            .and(query_param("check_out_date", "2025-06-04"))
            .and(query_param("adults", "2"))
            .and(query_param("currency", "USD"))
            .and(query_param("min_price", "100"))
            .and(query_param_is_missing("price"))
            .and(query_param("hl", "en"))
            .and(query_param("gl", "us"))
            .and(query_param("api_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "properties": [] })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SerpApiClient::new(
            format!("{}/search", mock_server.uri()),
            Some("test-key".to_string()),
        )
        .unwrap();

        let data = client
            .search_hotels(&search_query(json!({ "destination": "Lisbon", "minPrice": 100 })))
            .await
            .unwrap();
        assert_eq!(data, json!({ "properties": [] }));
    }

    #[tokio::test]
    async fn test_details_sends_property_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("property_token", "ChkIxyz"))
            .and(query_param_is_missing("q"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Pestana" })))
            .mount(&mock_server)
            .await;

        let client = SerpApiClient::new(
            format!("{}/search", mock_server.uri()),
            Some("test-key".to_string()),
        )
        .unwrap();

        let params: DetailsParams =
            serde_json::from_value(json!({ "propertyToken": "ChkIxyz" })).unwrap();
        let query = DetailsQuery::from_params(params, today()).unwrap();
        let data = client.hotel_details(&query).await.unwrap();
        assert_eq!(data["name"], "Pestana");
    }

    #[tokio::test]
    async fn test_missing_key_skips_network() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = SerpApiClient::new(mock_server.uri(), Some(String::new())).unwrap();
        assert!(!client.is_configured());

        let err = client
            .search_hotels(&search_query(json!({ "destination": "Oslo" })))
            .await
            .unwrap_err();
        assert!(matches!(err, SerpApiError::NotConfigured));
        assert!(err.to_string().contains("not configured"));
    }

    #[tokio::test]
    async fn test_non_success_status_carries_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&mock_server)
            .await;

        let client = SerpApiClient::new(mock_server.uri(), Some("bad".to_string())).unwrap();
        let err = client
            .search_hotels(&search_query(json!({ "destination": "Oslo" })))
            .await
            .unwrap_err();

        match &err {
            SerpApiError::Http { status, body } => {
                assert_eq!(*status, 401);
                assert_eq!(body, "Invalid API key");
            }
            other => panic!("expected Http error, got {:?}", other),
        }
        assert_eq!(err.to_string(), "SerpAPI request failed: 401");
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = SerpApiClient::new(mock_server.uri(), Some("key".to_string())).unwrap();
        let err = client
            .search_hotels(&search_query(json!({ "destination": "Oslo" })))
            .await
            .unwrap_err();
        assert!(matches!(err, SerpApiError::Decode(_)));
    }

    #[test]
    fn test_describe_params_masks_key() {
        let described = describe_params(&[("q", "Paris".to_string())]);
        assert_eq!(described, "q=Paris&api_key=***MASKED***");
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        assert_eq!(truncate("héllo", 2), "h");
        assert_eq!(truncate("short", 500), "short");
    }
}
