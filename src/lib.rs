//! Helpers for the Bioconda pull request comment bot.
//!
//! The library authenticates to GitHub, posts comments, checks organisation
//! membership, fetches pull requests, and resolves the CircleCI package
//! artifacts built for a commit by following the build links embedded in
//! its check runs.

pub mod circleci;
pub mod commands;
pub mod config;
pub mod github;
pub mod process;

pub use circleci::{ArtifactSource, CircleCiClient, parse_build_summary};
pub use commands::{BotCommand, CommentResponder, ResponseOutcome};
pub use config::BotConfig;
pub use github::{
    BotError, CommentContext, CommitArtifactIntake, GitHubGateway, OctocrabGateway,
    PersonalAccessToken, RepositoryLocator, load_comment_context, load_job_context,
};
pub use process::run_external_command;
