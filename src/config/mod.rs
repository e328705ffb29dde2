//! Bot configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – the public GitHub and CircleCI APIs and the
//!    `bioconda/bioconda-recipes` repository
//! 2. **Configuration file** – `.bioconda-bot.toml` in the current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `BOT_TOKEN`, `BOT_JOB_CONTEXT` (or the
//!    workflow's `JOB_CONTEXT`), and `BOT_<FIELD>` for the rest
//! 4. **Command-line arguments** – `--token`/`-t` and `--<field>`
//!
//! # Configuration File
//!
//! ```toml
//! github_api_base = "https://api.github.com"
//! circleci_api_base = "https://circleci.com/api/v1.1"
//! owner = "bioconda"
//! repository = "bioconda-recipes"
//! organisation = "bioconda"
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::circleci::DEFAULT_CIRCLECI_API_BASE;
use crate::github::error::BotError;
use crate::github::intake::DEFAULT_WORKFLOW_TITLE;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};

/// Environment variable the workflow uses to pass its event payload.
pub const JOB_CONTEXT_ENV: &str = "JOB_CONTEXT";

const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
const DEFAULT_OWNER: &str = "bioconda";
const DEFAULT_REPOSITORY: &str = "bioconda-recipes";
const DEFAULT_ORGANISATION: &str = "bioconda";
const DEFAULT_USER_AGENT: &str = "BiocondaCommentResponder";

/// Bot configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `BOT_TOKEN` or `--token`: GitHub token
/// - `BOT_JOB_CONTEXT`, `JOB_CONTEXT`, or `--job-context`: event payload
/// - `BOT_GITHUB_API_BASE` / `BOT_CIRCLECI_API_BASE`: API roots
///
/// # Example
///
/// ```no_run
/// use bioconda_bot::BotConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = BotConfig::load().expect("failed to load configuration");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "BOT",
    discovery(
        dotfile_name = ".bioconda-bot.toml",
        config_file_name = "bioconda-bot.toml",
        app_name = "bioconda-bot"
    )
)]
pub struct BotConfig {
    /// Token used to authenticate GitHub API requests.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `BOT_TOKEN`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// JSON job context describing the triggering event.
    ///
    /// Can be provided via:
    /// - CLI: `--job-context <JSON>`
    /// - Environment: `BOT_JOB_CONTEXT` or `JOB_CONTEXT`
    #[ortho_config()]
    pub job_context: Option<String>,

    /// GitHub REST API root.
    #[ortho_config()]
    pub github_api_base: String,

    /// CircleCI REST API root.
    #[ortho_config()]
    pub circleci_api_base: String,

    /// Owner of the recipe repository.
    #[ortho_config()]
    pub owner: String,

    /// Name of the recipe repository.
    #[ortho_config()]
    pub repository: String,

    /// Organisation whose members may issue bot commands.
    #[ortho_config()]
    pub organisation: String,

    /// `User-Agent` sent with every request.
    #[ortho_config()]
    pub user_agent: String,

    /// Check run title identifying the CircleCI test workflow.
    #[ortho_config()]
    pub workflow_title: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: None,
            job_context: None,
            github_api_base: DEFAULT_GITHUB_API_BASE.to_owned(),
            circleci_api_base: DEFAULT_CIRCLECI_API_BASE.to_owned(),
            owner: DEFAULT_OWNER.to_owned(),
            repository: DEFAULT_REPOSITORY.to_owned(),
            organisation: DEFAULT_ORGANISATION.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            workflow_title: DEFAULT_WORKFLOW_TITLE.to_owned(),
        }
    }
}

impl BotConfig {
    /// Returns the validated GitHub token.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::MissingToken`] when no source provides a
    /// non-blank token.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, BotError> {
        self.token
            .as_deref()
            .ok_or(BotError::MissingToken)
            .and_then(PersonalAccessToken::new)
    }

    /// Returns the raw job context payload.
    ///
    /// Falls back to the workflow's `JOB_CONTEXT` variable when no other
    /// source provides one.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::JobContext`] when no payload is available.
    pub fn resolve_job_context(&self) -> Result<String, BotError> {
        self.job_context
            .clone()
            .or_else(|| env::var(JOB_CONTEXT_ENV).ok())
            .ok_or_else(|| BotError::JobContext {
                message: format!("job context is required (set {JOB_CONTEXT_ENV})"),
            })
    }

    /// Builds the locator for the configured repository.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::InvalidUrl`] or [`BotError::Configuration`] when
    /// the API root or repository names are invalid.
    pub fn repository_locator(&self) -> Result<RepositoryLocator, BotError> {
        RepositoryLocator::new(&self.github_api_base, &self.owner, &self.repository)
    }
}
