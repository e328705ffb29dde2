//! Data models for the GitHub responses the bot interprets.

use serde::Deserialize;

/// One CI job result attached to a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRun {
    /// Check run name.
    pub name: Option<String>,
    /// Output title, used to pick the workflow of interest.
    pub title: Option<String>,
    /// Free-text output summary that embeds CI build URLs.
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCheckRunList {
    #[serde(default)]
    pub(super) check_runs: Vec<ApiCheckRun>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCheckRun {
    pub(super) name: Option<String>,
    pub(super) output: Option<ApiCheckRunOutput>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCheckRunOutput {
    pub(super) title: Option<String>,
    pub(super) summary: Option<String>,
}

impl From<ApiCheckRun> for CheckRun {
    fn from(value: ApiCheckRun) -> Self {
        let (title, summary) = value
            .output
            .map_or((None, None), |output| (output.title, output.summary));
        Self {
            name: value.name,
            title,
            summary,
        }
    }
}
