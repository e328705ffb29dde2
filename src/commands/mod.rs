//! Comment commands understood by the bot.
//!
//! The responder ties the helpers together: it reads the triggering
//! comment, checks the commenter's organisation membership, and answers
//! `@BiocondaBot please fetch artifacts` with the commit's package
//! artifacts.

use tracing::info;

use crate::circleci::ArtifactSource;
use crate::github::context::CommentContext;
use crate::github::error::BotError;
use crate::github::gateway::GitHubGateway;
use crate::github::intake::CommitArtifactIntake;

const FETCH_ARTIFACTS_COMMAND: &str = "@biocondabot please fetch artifacts";

/// A command recognised in a comment body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// List the package artifacts built for the pull request head.
    FetchArtifacts,
}

impl BotCommand {
    /// Finds a command in a comment, ignoring case.
    #[must_use]
    pub fn parse(comment: &str) -> Option<Self> {
        comment
            .to_lowercase()
            .contains(FETCH_ARTIFACTS_COMMAND)
            .then_some(Self::FetchArtifacts)
    }
}

/// What the responder did with a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// The job was not triggered by a pull request comment.
    NotPullRequestComment,
    /// The comment contains no bot command.
    NoCommand,
    /// The commenter is not an organisation member.
    NotMember,
    /// A reply was posted on the pull request.
    Replied {
        /// Pull request that received the reply.
        issue_number: u64,
        /// Number of artifacts listed.
        artifact_count: usize,
    },
}

/// Renders the reply listing `artifacts`.
#[must_use]
pub fn render_artifact_comment(commit_sha: &str, artifacts: &[String]) -> String {
    if artifacts.is_empty() {
        return format!("No artifacts found for commit {commit_sha}.");
    }
    let mut message = format!("Package artifacts for commit {commit_sha}:\n\n");
    for artifact in artifacts {
        message.push_str("- ");
        message.push_str(artifact);
        message.push('\n');
    }
    message
}

/// Answers bot commands found in pull request comments.
pub struct CommentResponder<'client, Gateway, Source>
where
    Gateway: GitHubGateway,
    Source: ArtifactSource,
{
    github: &'client Gateway,
    intake: CommitArtifactIntake<'client, Gateway, Source>,
}

impl<'client, Gateway, Source> CommentResponder<'client, Gateway, Source>
where
    Gateway: GitHubGateway,
    Source: ArtifactSource,
{
    /// Creates a responder using `intake` to resolve artifacts.
    #[must_use]
    pub const fn new(
        github: &'client Gateway,
        intake: CommitArtifactIntake<'client, Gateway, Source>,
    ) -> Self {
        Self { github, intake }
    }

    /// Handles the comment described by `context`.
    ///
    /// # Errors
    ///
    /// Propagates failures fetching the pull request or its artifacts and
    /// [`BotError::PostComment`] when GitHub rejects the reply.
    pub async fn respond(&self, context: &CommentContext) -> Result<ResponseOutcome, BotError> {
        let (Some(issue_number), Some(comment)) =
            (context.issue_number, context.comment_body.as_deref())
        else {
            return Ok(ResponseOutcome::NotPullRequestComment);
        };

        let Some(command) = BotCommand::parse(comment) else {
            return Ok(ResponseOutcome::NoCommand);
        };

        let is_member = match context.commenter.as_deref() {
            Some(user) => self.github.is_member(user).await,
            None => false,
        };
        if !is_member {
            info!(issue_number, commenter = ?context.commenter, "ignoring command from non-member");
            return Ok(ResponseOutcome::NotMember);
        }

        match command {
            BotCommand::FetchArtifacts => self.reply_with_artifacts(issue_number).await,
        }
    }

    async fn reply_with_artifacts(&self, issue_number: u64) -> Result<ResponseOutcome, BotError> {
        let pull_request = self.github.pull_request(issue_number).await?;
        let commit_sha = pull_request
            .pointer("/head/sha")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| BotError::Api {
                message: format!("pull request {issue_number} has no head.sha"),
            })?;

        let artifacts = self
            .intake
            .fetch_commit_artifacts(issue_number, commit_sha)
            .await?;
        let message = render_artifact_comment(commit_sha, &artifacts);
        self.github.post_comment(issue_number, &message).await?;

        Ok(ResponseOutcome::Replied {
            issue_number,
            artifact_count: artifacts.len(),
        })
    }
}

#[cfg(test)]
mod tests;
