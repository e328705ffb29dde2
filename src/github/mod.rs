//! GitHub access for the comment bot.
//!
//! This module wraps Octocrab to post comments, check organisation
//! membership, fetch pull requests, and list commit check runs. Errors are
//! mapped into [`BotError`] variants so callers can choose how loudly to
//! fail without depending on Octocrab internals.

pub mod context;
pub mod error;
pub mod gateway;
pub mod intake;
pub mod locator;
pub mod models;

pub use context::{CommentContext, load_comment_context, load_job_context, parse_job_context};
pub use error::BotError;
pub use gateway::{GitHubGateway, OctocrabGateway};
pub use intake::{CommitArtifactIntake, DEFAULT_WORKFLOW_TITLE};
pub use locator::{PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner};
pub use models::CheckRun;

#[cfg(test)]
pub use gateway::MockGitHubGateway;
