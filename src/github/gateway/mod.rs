//! Gateways for talking to the GitHub REST API through Octocrab.
//!
//! The trait-based design lets the artifact intake be tested with mocks
//! while the Octocrab implementation handles real HTTP requests.

mod client;
mod error_mapping;
mod http_utils;
mod octocrab_gateway;

pub use octocrab_gateway::OctocrabGateway;

use async_trait::async_trait;
use serde_json::Value;

use crate::github::error::BotError;
use crate::github::models::CheckRun;

/// Gateway for the GitHub operations the bot performs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitHubGateway: Send + Sync {
    /// Post `message` as a comment on an issue or pull request.
    ///
    /// Calling twice posts twice.
    async fn post_comment(&self, issue_number: u64, message: &str) -> Result<(), BotError>;

    /// Whether `user` belongs to the configured organisation.
    ///
    /// Only a `204 No Content` answer counts as membership; every other
    /// outcome, transport failures included, yields `false`.
    async fn is_member(&self, user: &str) -> bool;

    /// Fetch the raw pull request document.
    async fn pull_request(&self, pr_number: u64) -> Result<Value, BotError>;

    /// List the check runs attached to a commit, in API order.
    async fn check_runs(&self, commit_sha: &str) -> Result<Vec<CheckRun>, BotError>;
}
