//! Shared HTTP plumbing for the remote clients.
//!
//! Each helper issues exactly one request and tags any failure with the
//! calling operation's name. No retries.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::core::error::{CatalogError, Result};

/// Builds the HTTP client shared by a session's remote clients.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CatalogError::Config(format!("Failed to create HTTP client: {e}")))
}

/// Sends `request` and decodes a JSON body.
pub async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    operation: &'static str,
) -> Result<T> {
    let response = send_checked(request, operation).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| CatalogError::remote(operation, format!("Failed to parse response: {e}")))
}

/// Sends `request` and discards the body.
pub async fn send_discard(request: RequestBuilder, operation: &'static str) -> Result<()> {
    send_checked(request, operation).await.map(|_| ())
}

/// Convenience wrapper for a plain GET returning JSON.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    operation: &'static str,
) -> Result<T> {
    send_json(client.get(url), operation).await
}

async fn send_checked(request: RequestBuilder, operation: &'static str) -> Result<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| CatalogError::remote(operation, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(operation, status = status.as_u16(), "Remote call failed");
        return Err(CatalogError::remote(
            operation,
            format!("API error ({status}): {body}"),
        ));
    }

    Ok(response)
}

/// Joins a base URL and a path without doubling slashes.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
