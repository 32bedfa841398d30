//! Generic HTTP fetching with status and payload error classification

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

use crate::error::FetchError;

/// Fetches one JSON document and decodes it into `T`.
///
/// A single attempt is made. Transport failures, non-success statuses and
/// undecodable bodies are mapped onto [`FetchError`] variants:
/// - timeouts and connect failures get their own variants
/// - 404, 429, other 4xx, 502/503 and other 5xx are told apart
/// - an empty body, a non-JSON body and a JSON body of the wrong shape are told apart
///
/// # Arguments
/// * `client` - HTTP client for making requests
/// * `url` - URL to fetch data from
#[instrument(skip(client))]
pub async fn fetch<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, FetchError> {
    info!("Fetching data from URL: {url}");

    let response = client.get(url).send().await.map_err(|e| {
        error!("Request failed for URL {}: {}", url, e);
        if e.is_timeout() {
            FetchError::network_timeout(url)
        } else if e.is_connect() {
            FetchError::network_connection(url, e.to_string())
        } else {
            FetchError::Request(e)
        }
    })?;

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");
        error!("HTTP {} - {} (URL: {})", status_code, reason, url);
        return Err(FetchError::from_status(status_code, reason, url));
    }

    let response_text = response.text().await.map_err(|e| {
        error!("Failed to read response text from URL {}: {}", url, e);
        FetchError::Request(e)
    })?;

    debug!("Response length: {} bytes", response_text.len());
    let preview: String = response_text.chars().take(1024).collect();
    debug!("Response text (first 1024 chars): {preview}");

    parse_body(&response_text, url)
}

/// Decodes a response body, classifying failures the same way for every endpoint.
pub fn parse_body<T: DeserializeOwned>(response_text: &str, url: &str) -> Result<T, FetchError> {
    serde_json::from_str::<T>(response_text).map_err(|e| {
        error!("Failed to parse API response: {} (URL: {})", e, url);
        error!(
            "Response text (first 200 chars): {}",
            &response_text.chars().take(200).collect::<String>()
        );

        let trimmed = response_text.trim_start();
        if trimmed.is_empty() {
            FetchError::no_data("Response body is empty", url)
        } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
            FetchError::malformed_json("Response is not valid JSON", url)
        } else if e.is_syntax() || e.is_eof() {
            FetchError::malformed_json(e.to_string(), url)
        } else {
            FetchError::unexpected_structure(e.to_string(), url)
        }
    })
}
