//! Commit artifact intake combining GitHub check runs with CircleCI listings.

use tracing::{debug, info};

use super::error::BotError;
use super::gateway::GitHubGateway;
use crate::circleci::{ArtifactSource, parse_build_summary};

/// Title of the check run whose summary links the CircleCI builds.
pub const DEFAULT_WORKFLOW_TITLE: &str = "Workflow: bioconda-test";

/// Resolves the package artifacts built for a commit.
pub struct CommitArtifactIntake<'client, Gateway, Source>
where
    Gateway: GitHubGateway,
    Source: ArtifactSource,
{
    github: &'client Gateway,
    artifacts: &'client Source,
    workflow_title: String,
}

impl<'client, Gateway, Source> CommitArtifactIntake<'client, Gateway, Source>
where
    Gateway: GitHubGateway,
    Source: ArtifactSource,
{
    /// Create an intake matching check runs titled [`DEFAULT_WORKFLOW_TITLE`].
    #[must_use]
    pub fn new(github: &'client Gateway, artifacts: &'client Source) -> Self {
        Self {
            github,
            artifacts,
            workflow_title: DEFAULT_WORKFLOW_TITLE.to_owned(),
        }
    }

    /// Match check runs with a different output title.
    #[must_use]
    pub fn with_workflow_title(mut self, workflow_title: impl Into<String>) -> Self {
        self.workflow_title = workflow_title.into();
        self
    }

    /// Collect artifact URLs for every matching check run of `commit_sha`.
    ///
    /// Check runs are visited in API order and their builds in summary
    /// order; each build is resolved before the next is requested. Results
    /// are concatenated without deduplication across builds. `pr_number`
    /// is only used for logging.
    ///
    /// # Errors
    ///
    /// Propagates failures listing the check runs and resolving any build.
    pub async fn fetch_commit_artifacts(
        &self,
        pr_number: u64,
        commit_sha: &str,
    ) -> Result<Vec<String>, BotError> {
        let check_runs = self.github.check_runs(commit_sha).await?;
        let mut artifacts = Vec::new();

        for check_run in check_runs
            .iter()
            .filter(|run| run.title.as_deref() == Some(self.workflow_title.as_str()))
        {
            let summary = check_run.summary.as_deref().unwrap_or_default();
            for build_id in parse_build_summary(summary) {
                debug!(pr_number, commit_sha, %build_id, "resolving build artifacts");
                let build_artifacts = self.artifacts.build_artifacts(&build_id).await?;
                artifacts.extend(build_artifacts);
            }
        }

        info!(pr_number, commit_sha, count = artifacts.len(), "collected commit artifacts");
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use mockall::Sequence;
    use mockall::predicate::eq;
    use rstest::rstest;

    use super::CommitArtifactIntake;
    use crate::circleci::MockArtifactSource;
    use crate::github::error::BotError;
    use crate::github::gateway::MockGitHubGateway;
    use crate::github::models::CheckRun;

    fn check_run(title: &str, summary: &str) -> CheckRun {
        CheckRun {
            name: Some("bioconda-test".to_owned()),
            title: Some(title.to_owned()),
            summary: Some(summary.to_owned()),
        }
    }

    fn set_of(urls: &[&str]) -> BTreeSet<String> {
        urls.iter().map(|url| (*url).to_owned()).collect()
    }

    #[rstest]
    #[tokio::test]
    async fn concatenates_builds_in_check_run_and_summary_order() {
        let mut github = MockGitHubGateway::new();
        github
            .expect_check_runs()
            .with(eq("abc123"))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    check_run(
                        "Workflow: bioconda-test",
                        "gh/bioconda/bioconda-recipes/2 gh/bioconda/bioconda-recipes/1",
                    ),
                    check_run("Workflow: lint", "gh/bioconda/bioconda-recipes/99"),
                    check_run("Workflow: bioconda-test", "gh/bioconda/bioconda-recipes/3"),
                ])
            });

        let mut sequence = Sequence::new();
        let mut source = MockArtifactSource::new();
        for (build, urls) in [
            ("2", set_of(&["b.tar.bz2"])),
            ("1", set_of(&["a.tar.bz2", "linux-64/repodata.json"])),
            ("3", set_of(&["b.tar.bz2"])),
        ] {
            source
                .expect_build_artifacts()
                .with(eq(build))
                .times(1)
                .in_sequence(&mut sequence)
                .returning(move |_| Ok(urls.clone()));
        }

        let intake = CommitArtifactIntake::new(&github, &source);
        let artifacts = intake
            .fetch_commit_artifacts(42, "abc123")
            .await
            .expect("artifacts should resolve");

        assert_eq!(
            artifacts,
            vec!["b.tar.bz2", "a.tar.bz2", "linux-64/repodata.json", "b.tar.bz2"]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn check_runs_without_build_links_contribute_nothing() {
        let mut github = MockGitHubGateway::new();
        github.expect_check_runs().returning(|_| {
            Ok(vec![
                check_run("Workflow: bioconda-test", "build pending"),
                CheckRun {
                    name: None,
                    title: Some("Workflow: bioconda-test".to_owned()),
                    summary: None,
                },
            ])
        });
        let mut source = MockArtifactSource::new();
        source.expect_build_artifacts().never();

        let intake = CommitArtifactIntake::new(&github, &source);
        let artifacts = intake
            .fetch_commit_artifacts(1, "abc123")
            .await
            .expect("empty result is not an error");

        assert!(artifacts.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn custom_workflow_title_selects_check_runs() {
        let mut github = MockGitHubGateway::new();
        github.expect_check_runs().returning(|_| {
            Ok(vec![
                check_run("Workflow: bioconda-test", "gh/bioconda/bioconda-recipes/1"),
                check_run("Workflow: nightly", "gh/bioconda/bioconda-recipes/5"),
            ])
        });
        let mut source = MockArtifactSource::new();
        source
            .expect_build_artifacts()
            .with(eq("5"))
            .times(1)
            .returning(|_| Ok(set_of(&["n.tar.gz"])));

        let intake =
            CommitArtifactIntake::new(&github, &source).with_workflow_title("Workflow: nightly");
        let artifacts = intake
            .fetch_commit_artifacts(1, "abc123")
            .await
            .expect("artifacts should resolve");

        assert_eq!(artifacts, vec!["n.tar.gz"]);
    }

    #[rstest]
    #[tokio::test]
    async fn check_run_failure_is_propagated() {
        let mut github = MockGitHubGateway::new();
        github.expect_check_runs().returning(|_| {
            Err(BotError::Api {
                message: "check runs failed with status 404 Not Found: No commit found".to_owned(),
            })
        });
        let source = MockArtifactSource::new();

        let intake = CommitArtifactIntake::new(&github, &source);
        let result = intake.fetch_commit_artifacts(1, "abc123").await;

        assert!(
            matches!(result, Err(BotError::Api { .. })),
            "unexpected result: {result:?}"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn build_failure_stops_resolution() {
        let mut github = MockGitHubGateway::new();
        github.expect_check_runs().returning(|_| {
            Ok(vec![check_run(
                "Workflow: bioconda-test",
                "gh/bioconda/bioconda-recipes/1 gh/bioconda/bioconda-recipes/2",
            )])
        });
        let mut source = MockArtifactSource::new();
        source
            .expect_build_artifacts()
            .with(eq("1"))
            .times(1)
            .returning(|_| {
                Err(BotError::ArtifactListing {
                    message: "expected value".to_owned(),
                })
            });
        source.expect_build_artifacts().with(eq("2")).never();

        let intake = CommitArtifactIntake::new(&github, &source);
        let result = intake.fetch_commit_artifacts(1, "abc123").await;

        assert!(
            matches!(result, Err(BotError::ArtifactListing { .. })),
            "unexpected result: {result:?}"
        );
    }
}
