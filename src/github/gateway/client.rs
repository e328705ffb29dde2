//! Octocrab client construction helpers for gateway implementations.
//!
//! The client is assembled from Octocrab's service layers rather than its
//! default builder. The default stack retries failed requests and always
//! sends `User-Agent: octocrab` alongside any configured agent, and neither
//! is acceptable for a bot that posts comments under a fixed identity.

use std::sync::Arc;

use http::header::{AUTHORIZATION, HeaderName, HeaderValue, USER_AGENT};
use http::Uri;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use octocrab::service::middleware::base_uri::BaseUriLayer;
use octocrab::service::middleware::extra_headers::ExtraHeadersLayer;
use octocrab::{AuthState, Octocrab, OctocrabBuilder};

use crate::github::error::BotError;
use crate::github::locator::PersonalAccessToken;

/// Builds an Octocrab client that authenticates with `token <value>` and
/// identifies itself with the configured user agent.
///
/// Every request is sent exactly once and carries a single `User-Agent`
/// value.
///
/// # Errors
///
/// Returns `BotError::InvalidUrl` when the base URI cannot be parsed,
/// `BotError::Configuration` when the token or user agent is not a valid
/// header value, and `BotError::Network` when the TLS roots cannot be
/// loaded.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
    user_agent: &str,
) -> Result<Octocrab, BotError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| BotError::InvalidUrl(error.to_string()))?;
    let headers = request_headers(token, user_agent)?;

    let connector = HttpsConnectorBuilder::new()
        .with_native_roots()
        .map_err(|error| BotError::Network {
            message: format!("loading TLS roots failed: {error}"),
        })?
        .https_or_http()
        .enable_http1()
        .build();
    let transport = Client::builder(TokioExecutor::new()).build(connector);

    let built = OctocrabBuilder::new_empty()
        .with_service(transport)
        .with_layer(&BaseUriLayer::new(base_uri))
        .with_layer(&ExtraHeadersLayer::new(Arc::new(headers)))
        .with_auth(AuthState::None)
        .build();
    Ok(built.unwrap_or_else(|never| match never {}))
}

/// Headers attached to every GitHub request.
fn request_headers(
    token: &PersonalAccessToken,
    user_agent: &str,
) -> Result<Vec<(HeaderName, HeaderValue)>, BotError> {
    let mut authorization =
        HeaderValue::from_str(&token.authorization_header()).map_err(|error| {
            BotError::Configuration {
                message: format!("token is not a valid header value: {error}"),
            }
        })?;
    authorization.set_sensitive(true);
    let agent = HeaderValue::from_str(user_agent).map_err(|error| BotError::Configuration {
        message: format!("user agent is not a valid header value: {error}"),
    })?;
    Ok(vec![(AUTHORIZATION, authorization), (USER_AGENT, agent)])
}

pub(super) fn parse_path(path: &str) -> Result<Uri, BotError> {
    path.parse::<Uri>()
        .map_err(|error| BotError::InvalidUrl(error.to_string()))
}
