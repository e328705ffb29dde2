//! Octocrab implementation of the GitHub gateway.

use async_trait::async_trait;
use http::header::{ACCEPT, HeaderMap, HeaderValue};
use http::StatusCode;
use octocrab::Octocrab;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::github::error::BotError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator, organisation_member_path};
use crate::github::models::{ApiCheckRunList, CheckRun};

use super::GitHubGateway;
use super::client::{build_octocrab_client, parse_path};
use super::error_mapping::map_octocrab_error;
use super::http_utils::get_success_body;

const CHECK_RUNS_MEDIA_TYPE: &str = "application/vnd.github.antiope-preview+json";

#[derive(Debug, Serialize)]
struct CommentPayload<'message> {
    body: &'message str,
}

/// Octocrab-backed gateway bound to one repository and organisation.
pub struct OctocrabGateway {
    client: Octocrab,
    locator: RepositoryLocator,
    organisation: String,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub fn new(client: Octocrab, locator: RepositoryLocator, organisation: &str) -> Self {
        Self {
            client,
            locator,
            organisation: organisation.to_owned(),
        }
    }

    /// Builds an authenticated Octocrab client for the locator's API host.
    ///
    /// # Errors
    ///
    /// Returns `BotError::InvalidUrl` when the base URI cannot be parsed or
    /// `BotError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: RepositoryLocator,
        organisation: &str,
        user_agent: &str,
    ) -> Result<Self, BotError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str(), user_agent)?;
        Ok(Self::new(octocrab, locator, organisation))
    }
}

const fn is_comment_accepted(status: StatusCode) -> bool {
    matches!(status.as_u16(), 200..=202)
}

#[async_trait]
impl GitHubGateway for OctocrabGateway {
    async fn post_comment(&self, issue_number: u64, message: &str) -> Result<(), BotError> {
        let path = self.locator.issue_comments_path(issue_number);
        let payload = CommentPayload { body: message };
        debug!(%path, ?payload, "sending comment");

        let response = self
            .client
            ._post(parse_path(&path)?, Some(&payload))
            .await
            .map_err(|error| map_octocrab_error("post comment", &error))?;

        let status = response.status();
        info!(status = status.as_u16(), issue_number, "comment response received");
        if is_comment_accepted(status) {
            Ok(())
        } else {
            Err(BotError::PostComment {
                status: status.as_u16(),
            })
        }
    }

    async fn is_member(&self, user: &str) -> bool {
        let path = organisation_member_path(&self.organisation, user);
        let uri = match parse_path(&path) {
            Ok(uri) => uri,
            Err(error) => {
                warn!(user, %error, "membership path is invalid; treating as non-member");
                return false;
            }
        };

        match self.client._get(uri).await {
            Ok(response) => {
                let status = response.status();
                debug!(user, status = status.as_u16(), "membership lookup answered");
                status == StatusCode::NO_CONTENT
            }
            Err(error) => {
                warn!(user, %error, "membership lookup failed; treating as non-member");
                false
            }
        }
    }

    async fn pull_request(&self, pr_number: u64) -> Result<Value, BotError> {
        let path = self.locator.pull_request_path(pr_number);
        let body = get_success_body(&self.client, "pull request", &path, None).await?;
        serde_json::from_str(&body).map_err(|error| BotError::Api {
            message: format!("pull request response deserialisation failed: {error}"),
        })
    }

    async fn check_runs(&self, commit_sha: &str) -> Result<Vec<CheckRun>, BotError> {
        let path = self.locator.check_runs_path(commit_sha);
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(CHECK_RUNS_MEDIA_TYPE));

        let body = get_success_body(&self.client, "check runs", &path, Some(headers)).await?;
        let list: ApiCheckRunList =
            serde_json::from_str(&body).map_err(|error| BotError::Api {
                message: format!("check runs response deserialisation failed: {error}"),
            })?;
        Ok(list.check_runs.into_iter().map(CheckRun::from).collect())
    }
}
