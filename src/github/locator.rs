//! Identity wrappers and API path builders for the target repository.

use url::Url;

use super::error::BotError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Validates that the owner is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Configuration`] when the value is blank.
    pub fn new(value: &str) -> Result<Self, BotError> {
        non_blank(value, "repository owner").map(Self)
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Validates that the repository name is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Configuration`] when the value is blank.
    pub fn new(value: &str) -> Result<Self, BotError> {
        non_blank(value, "repository name").map(Self)
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `BotError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, BotError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BotError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }

    /// Formats the `Authorization` header value GitHub expects for tokens.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("token {}", self.0)
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("PersonalAccessToken(***)")
    }
}

/// Locates the recipe repository on a GitHub API host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Builds a locator from an API base URL and owner/repository names.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::InvalidUrl`] when the base URL cannot be parsed
    /// and [`BotError::Configuration`] when owner or repository is blank.
    pub fn new(api_base: &str, owner: &str, repository: &str) -> Result<Self, BotError> {
        let parsed =
            Url::parse(api_base).map_err(|error| BotError::InvalidUrl(error.to_string()))?;
        Ok(Self {
            api_base: parsed,
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repository)?,
        })
    }

    /// API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    pub(crate) fn issue_comments_path(&self, issue_number: u64) -> String {
        format!(
            "/repos/{}/{}/issues/{issue_number}/comments",
            self.owner.as_str(),
            self.repository.as_str(),
        )
    }

    pub(crate) fn pull_request_path(&self, pr_number: u64) -> String {
        format!(
            "/repos/{}/{}/pulls/{pr_number}",
            self.owner.as_str(),
            self.repository.as_str(),
        )
    }

    pub(crate) fn check_runs_path(&self, commit_sha: &str) -> String {
        format!(
            "/repos/{}/{}/commits/{commit_sha}/check-runs",
            self.owner.as_str(),
            self.repository.as_str(),
        )
    }
}

pub(crate) fn organisation_member_path(organisation: &str, user: &str) -> String {
    format!("/orgs/{organisation}/members/{user}")
}

fn non_blank(value: &str, field: &str) -> Result<String, BotError> {
    if value.trim().is_empty() {
        return Err(BotError::Configuration {
            message: format!("{field} must not be blank"),
        });
    }
    Ok(value.to_owned())
}
