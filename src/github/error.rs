//! Error types shared by the bot's GitHub, CI provider, and process helpers.

use thiserror::Error;

/// Errors surfaced while talking to GitHub or the CI provider, reading the
/// job context, or running external commands.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BotError {
    /// The authentication token was missing or blank.
    #[error("bot token is required (set BOT_TOKEN)")]
    MissingToken,

    /// A configured base URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// A remote API answered with a failure status.
    #[error("API error: {message}")]
    Api {
        /// Operation, status, and response detail describing the failure.
        message: String,
    },

    /// Networking failed while calling a remote API.
    #[error("network error: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// GitHub did not accept a comment.
    #[error("posting comment failed with status {status}")]
    PostComment {
        /// HTTP status code returned by GitHub.
        status: u16,
    },

    /// The CI provider's artifact listing could not be parsed.
    #[error("artifact listing could not be parsed: {message}")]
    ArtifactListing {
        /// Parser detail.
        message: String,
    },

    /// The job context payload was absent or malformed.
    #[error("job context error: {message}")]
    JobContext {
        /// Details about the missing or malformed field.
        message: String,
    },

    /// An external command exited unsuccessfully.
    #[error("failed to execute {command} {arguments:?} (return code: {exit_code:?})")]
    ExternalCommand {
        /// Program that was launched.
        command: String,
        /// Arguments passed to the program.
        arguments: Vec<String>,
        /// Exit code, or `None` when the process was terminated by a signal.
        exit_code: Option<i32>,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
