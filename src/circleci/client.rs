//! HTTP client for CircleCI's v1.1 artifact endpoint.

use std::collections::BTreeSet;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, redirect};
use tracing::{debug, info};
use url::Url;

use crate::github::error::BotError;
use crate::github::locator::RepositoryLocator;

use super::listing::package_artifact_urls;

/// Public CircleCI API root.
pub const DEFAULT_CIRCLECI_API_BASE: &str = "https://circleci.com/api/v1.1";

/// Bodies shorter than this carry no records.
const MIN_LISTING_LENGTH: usize = 3;

/// Source of build artifacts keyed by CI build number.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    /// Resolve one build to the URLs of its package artifacts.
    ///
    /// A relocated (301) or near-empty listing yields an empty set.
    async fn build_artifacts(&self, build_id: &str) -> Result<BTreeSet<String>, BotError>;
}

/// Unauthenticated `reqwest` client for the CircleCI API.
#[derive(Debug, Clone)]
pub struct CircleCiClient {
    http: Client,
    api_base: Url,
    owner: String,
    repository: String,
}

impl CircleCiClient {
    /// Creates a client for the project matching `locator`'s repository.
    ///
    /// Redirects are not followed so that a relocated listing is visible as
    /// a 301.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::InvalidUrl`] when `api_base` cannot be parsed and
    /// [`BotError::Configuration`] when the HTTP client cannot be built.
    pub fn new(
        api_base: &str,
        locator: &RepositoryLocator,
        user_agent: &str,
    ) -> Result<Self, BotError> {
        let parsed =
            Url::parse(api_base).map_err(|error| BotError::InvalidUrl(error.to_string()))?;
        let http = Client::builder()
            .redirect(redirect::Policy::none())
            .user_agent(user_agent)
            .build()
            .map_err(|error| BotError::Configuration {
                message: format!("failed to configure CircleCI HTTP client: {error}"),
            })?;
        Ok(Self {
            http,
            api_base: parsed,
            owner: locator.owner().as_str().to_owned(),
            repository: locator.repository().as_str().to_owned(),
        })
    }

    fn artifacts_url(&self, build_id: &str) -> String {
        format!(
            "{}/project/github/{}/{}/{build_id}/artifacts",
            self.api_base.as_str().trim_end_matches('/'),
            self.owner,
            self.repository,
        )
    }
}

#[async_trait]
impl ArtifactSource for CircleCiClient {
    async fn build_artifacts(&self, build_id: &str) -> Result<BTreeSet<String>, BotError> {
        let url = self.artifacts_url(build_id);
        info!(%url, "contacting CircleCI");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|error| BotError::Network {
                message: format!("artifact listing for build {build_id} failed: {error}"),
            })?;

        let status = response.status();
        if status == StatusCode::MOVED_PERMANENTLY {
            info!(build_id, "artifact listing relocated; no artifacts available");
            return Ok(BTreeSet::new());
        }
        if !status.is_success() {
            return Err(BotError::Api {
                message: format!("artifact listing for build {build_id} failed with status {status}"),
            });
        }

        let body = response.text().await.map_err(|error| BotError::Network {
            message: format!("artifact listing for build {build_id} could not be read: {error}"),
        })?;
        if body.chars().count() < MIN_LISTING_LENGTH {
            debug!(build_id, "artifact listing is empty");
            return Ok(BTreeSet::new());
        }

        package_artifact_urls(&body)
    }
}
