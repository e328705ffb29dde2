//! Tests for comment command handling.

use std::collections::BTreeSet;

use mockall::predicate::{eq, function};
use rstest::rstest;
use serde_json::json;

use super::{BotCommand, CommentResponder, ResponseOutcome, render_artifact_comment};
use crate::circleci::MockArtifactSource;
use crate::github::context::CommentContext;
use crate::github::error::BotError;
use crate::github::gateway::MockGitHubGateway;
use crate::github::intake::CommitArtifactIntake;
use crate::github::models::CheckRun;

fn comment(body: &str, commenter: Option<&str>) -> CommentContext {
    CommentContext {
        job_context: json!({}),
        issue_number: Some(17),
        comment_body: Some(body.to_owned()),
        commenter: commenter.map(ToOwned::to_owned),
    }
}

#[rstest]
#[case::exact("@BiocondaBot please fetch artifacts", Some(BotCommand::FetchArtifacts))]
#[case::lowercase("@biocondabot PLEASE fetch artifacts now", Some(BotCommand::FetchArtifacts))]
#[case::embedded("Thanks!\n@BiocondaBot please fetch artifacts", Some(BotCommand::FetchArtifacts))]
#[case::other_text("@BiocondaBot please add label", None)]
#[case::empty("", None)]
fn parses_commands(#[case] body: &str, #[case] expected: Option<BotCommand>) {
    assert_eq!(BotCommand::parse(body), expected);
}

#[rstest]
fn renders_artifact_list() {
    let message = render_artifact_comment(
        "abc123",
        &["a.tar.bz2".to_owned(), "linux-64/repodata.json".to_owned()],
    );

    assert_eq!(
        message,
        "Package artifacts for commit abc123:\n\n- a.tar.bz2\n- linux-64/repodata.json\n"
    );
}

#[rstest]
fn renders_empty_notice() {
    assert_eq!(
        render_artifact_comment("abc123", &[]),
        "No artifacts found for commit abc123."
    );
}

#[rstest]
#[tokio::test]
async fn member_request_posts_artifacts() {
    let mut github = MockGitHubGateway::new();
    github
        .expect_is_member()
        .with(eq("octocat"))
        .times(1)
        .returning(|_| true);
    github
        .expect_pull_request()
        .with(eq(17_u64))
        .times(1)
        .returning(|_| Ok(json!({ "number": 17, "head": { "sha": "abc123" } })));
    github.expect_check_runs().with(eq("abc123")).returning(|_| {
        Ok(vec![CheckRun {
            name: None,
            title: Some("Workflow: bioconda-test".to_owned()),
            summary: Some("https://circleci.com/gh/bioconda/bioconda-recipes/5".to_owned()),
        }])
    });
    github
        .expect_post_comment()
        .with(
            eq(17_u64),
            function(|message: &str| message.contains("- pkg.tar.bz2")),
        )
        .times(1)
        .returning(|_, _| Ok(()));
    let mut source = MockArtifactSource::new();
    source
        .expect_build_artifacts()
        .with(eq("5"))
        .returning(|_| Ok(BTreeSet::from(["pkg.tar.bz2".to_owned()])));

    let responder = CommentResponder::new(&github, CommitArtifactIntake::new(&github, &source));
    let outcome = responder
        .respond(&comment("@BiocondaBot please fetch artifacts", Some("octocat")))
        .await
        .expect("command should succeed");

    assert_eq!(
        outcome,
        ResponseOutcome::Replied {
            issue_number: 17,
            artifact_count: 1,
        }
    );
}

#[rstest]
#[case::stranger(Some("stranger"))]
#[case::anonymous(None)]
#[tokio::test]
async fn non_members_are_ignored(#[case] commenter: Option<&str>) {
    let mut github = MockGitHubGateway::new();
    github.expect_is_member().returning(|_| false);
    github.expect_pull_request().never();
    github.expect_post_comment().never();
    let source = MockArtifactSource::new();

    let responder = CommentResponder::new(&github, CommitArtifactIntake::new(&github, &source));
    let outcome = responder
        .respond(&comment("@BiocondaBot please fetch artifacts", commenter))
        .await
        .expect("ignored commands are not errors");

    assert_eq!(outcome, ResponseOutcome::NotMember);
}

#[rstest]
#[tokio::test]
async fn comments_without_commands_are_ignored() {
    let mut github = MockGitHubGateway::new();
    github.expect_is_member().never();
    let source = MockArtifactSource::new();

    let responder = CommentResponder::new(&github, CommitArtifactIntake::new(&github, &source));
    let outcome = responder
        .respond(&comment("LGTM", Some("octocat")))
        .await
        .expect("plain comments are not errors");

    assert_eq!(outcome, ResponseOutcome::NoCommand);
}

#[rstest]
#[tokio::test]
async fn non_comment_events_are_ignored() {
    let github = MockGitHubGateway::new();
    let source = MockArtifactSource::new();
    let context = CommentContext {
        job_context: json!({ "event": {} }),
        issue_number: None,
        comment_body: None,
        commenter: None,
    };

    let responder = CommentResponder::new(&github, CommitArtifactIntake::new(&github, &source));
    let outcome = responder
        .respond(&context)
        .await
        .expect("non-comment events are not errors");

    assert_eq!(outcome, ResponseOutcome::NotPullRequestComment);
}

#[rstest]
#[tokio::test]
async fn rejected_reply_is_reported() {
    let mut github = MockGitHubGateway::new();
    github.expect_is_member().returning(|_| true);
    github
        .expect_pull_request()
        .returning(|_| Ok(json!({ "head": { "sha": "abc123" } })));
    github.expect_check_runs().returning(|_| Ok(Vec::new()));
    github
        .expect_post_comment()
        .returning(|_, _| Err(BotError::PostComment { status: 422 }));
    let source = MockArtifactSource::new();

    let responder = CommentResponder::new(&github, CommitArtifactIntake::new(&github, &source));
    let result = responder
        .respond(&comment("@BiocondaBot please fetch artifacts", Some("octocat")))
        .await;

    assert_eq!(result, Err(BotError::PostComment { status: 422 }));
}

#[rstest]
#[tokio::test]
async fn pull_request_without_head_sha_is_an_error() {
    let mut github = MockGitHubGateway::new();
    github.expect_is_member().returning(|_| true);
    github
        .expect_pull_request()
        .returning(|_| Ok(json!({ "number": 17 })));
    github.expect_post_comment().never();
    let source = MockArtifactSource::new();

    let responder = CommentResponder::new(&github, CommitArtifactIntake::new(&github, &source));
    let result = responder
        .respond(&comment("@BiocondaBot please fetch artifacts", Some("octocat")))
        .await;

    assert!(
        matches!(result, Err(BotError::Api { ref message }) if message.contains("head.sha")),
        "unexpected result: {result:?}"
    );
}
