//! Shared HTTP utilities for gateway implementations.

use http::HeaderMap;
use octocrab::Octocrab;

use crate::github::error::BotError;

use super::client::parse_path;
use super::error_mapping::{map_http_error, map_octocrab_error};

/// Issues a GET and returns the body of a successful response.
///
/// Failure statuses are mapped through [`map_http_error`] using the
/// `message` field GitHub includes in error bodies.
pub(super) async fn get_success_body(
    client: &Octocrab,
    operation: &str,
    path: &str,
    headers: Option<HeaderMap>,
) -> Result<String, BotError> {
    let response = client
        ._get_with_headers(parse_path(path)?, headers)
        .await
        .map_err(|error| map_octocrab_error(operation, &error))?;

    let status = response.status();
    if status.is_success() {
        return client
            .body_to_string(response)
            .await
            .map_err(|error| BotError::Api {
                message: format!("{operation} response decode failed: {error}"),
            });
    }

    let body = client
        .body_to_string(response)
        .await
        .unwrap_or_else(|_| String::new());
    Err(map_http_error(
        operation,
        status,
        extract_github_message(&body),
    ))
}

pub(super) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}
