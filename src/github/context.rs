//! Job context parsing for comment-triggered runs.
//!
//! The workflow passes its event payload as JSON. Only issue comments on
//! pull requests are actionable; everything else is reported as "not a pull
//! request comment" rather than as an error.

use serde_json::Value;
use tracing::{debug, info};

use super::error::BotError;
use crate::config::BotConfig;

/// The triggering comment extracted from the job context.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentContext {
    /// Full job context payload.
    pub job_context: Value,
    /// Pull request number, `None` when the event is not a PR comment.
    pub issue_number: Option<u64>,
    /// Comment text, `None` when the event is not a PR comment.
    pub comment_body: Option<String>,
    /// Login of the commenter when GitHub supplied one.
    pub commenter: Option<String>,
}

impl CommentContext {
    /// Whether the job was triggered by a comment on a pull request.
    #[must_use]
    pub const fn is_pull_request_comment(&self) -> bool {
        self.issue_number.is_some()
    }

    /// Classifies an already parsed job context.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::JobContext`] when the event targets a pull request
    /// but lacks the issue number or comment body.
    pub fn from_job_context(job_context: Value) -> Result<Self, BotError> {
        let issue = job_context.pointer("/event/issue");
        let is_pull_request = issue
            .and_then(|value| value.get("pull_request"))
            .is_some_and(|marker| !marker.is_null());
        if !is_pull_request {
            return Ok(Self {
                job_context,
                issue_number: None,
                comment_body: None,
                commenter: None,
            });
        }

        let issue_number = issue
            .and_then(|value| value.get("number"))
            .and_then(Value::as_u64)
            .ok_or_else(|| BotError::JobContext {
                message: "event.issue.number is missing".to_owned(),
            })?;
        let comment_body = job_context
            .pointer("/event/comment/body")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
            .ok_or_else(|| BotError::JobContext {
                message: "event.comment.body is missing".to_owned(),
            })?;
        let commenter = job_context
            .pointer("/event/comment/user/login")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);

        info!(issue_number, comment = %comment_body, "pull request comment received");
        Ok(Self {
            job_context,
            issue_number: Some(issue_number),
            comment_body: Some(comment_body),
            commenter,
        })
    }
}

/// Parses a raw job context payload.
///
/// # Errors
///
/// Returns [`BotError::JobContext`] when the payload is not valid JSON.
pub fn parse_job_context(raw: &str) -> Result<Value, BotError> {
    let job_context: Value = serde_json::from_str(raw).map_err(|error| BotError::JobContext {
        message: format!("job context is not valid JSON: {error}"),
    })?;
    debug!(%job_context, "job context loaded");
    Ok(job_context)
}

/// Loads the job context configured for this run.
///
/// # Errors
///
/// Returns [`BotError::JobContext`] when no payload is configured or it is
/// malformed.
pub fn load_job_context(config: &BotConfig) -> Result<Value, BotError> {
    parse_job_context(&config.resolve_job_context()?)
}

/// Loads the job context and extracts the triggering pull request comment.
///
/// # Errors
///
/// Propagates [`load_job_context`] failures and
/// [`CommentContext::from_job_context`] failures.
pub fn load_comment_context(config: &BotConfig) -> Result<CommentContext, BotError> {
    CommentContext::from_job_context(load_job_context(config)?)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::{CommentContext, load_comment_context, parse_job_context};
    use crate::config::BotConfig;
    use crate::github::error::BotError;

    fn config_with(job_context: &Value) -> BotConfig {
        BotConfig {
            job_context: Some(job_context.to_string()),
            ..BotConfig::default()
        }
    }

    #[rstest]
    fn pull_request_comment_is_extracted() {
        let payload = json!({
            "event": {
                "issue": {
                    "number": 4242,
                    "pull_request": { "url": "https://api.github.com/repos/bioconda/bioconda-recipes/pulls/4242" }
                },
                "comment": {
                    "body": "@BiocondaBot please fetch artifacts",
                    "user": { "login": "octocat" }
                }
            }
        });

        let context = load_comment_context(&config_with(&payload)).expect("context should load");

        assert!(context.is_pull_request_comment());
        assert_eq!(context.issue_number, Some(4242));
        assert_eq!(
            context.comment_body.as_deref(),
            Some("@BiocondaBot please fetch artifacts")
        );
        assert_eq!(context.commenter.as_deref(), Some("octocat"));
        assert_eq!(context.job_context, payload);
    }

    #[rstest]
    #[case::plain_issue(json!({ "event": { "issue": { "number": 1 }, "comment": { "body": "hi" } } }))]
    #[case::null_marker(json!({ "event": { "issue": { "number": 1, "pull_request": null } } }))]
    #[case::no_issue(json!({ "event": { "pull_request": { "number": 1 } } }))]
    #[case::no_event(json!({ "job": "build" }))]
    fn other_events_are_not_pull_request_comments(#[case] payload: Value) {
        let context = CommentContext::from_job_context(payload.clone())
            .expect("non-comment events are not errors");

        assert_eq!(
            context,
            CommentContext {
                job_context: payload,
                issue_number: None,
                comment_body: None,
                commenter: None,
            }
        );
    }

    #[rstest]
    #[case::missing_number(json!({ "event": { "issue": { "pull_request": {} }, "comment": { "body": "x" } } }))]
    #[case::missing_body(json!({ "event": { "issue": { "number": 3, "pull_request": {} } } }))]
    fn incomplete_pull_request_comments_are_errors(#[case] payload: Value) {
        let result = CommentContext::from_job_context(payload);

        assert!(
            matches!(result, Err(BotError::JobContext { .. })),
            "unexpected result: {result:?}"
        );
    }

    #[rstest]
    fn malformed_payload_is_an_error() {
        let result = parse_job_context("{not json");

        assert!(
            matches!(result, Err(BotError::JobContext { ref message }) if message.contains("not valid JSON")),
            "unexpected result: {result:?}"
        );
    }
}
