//! Repair and parsing of CircleCI's artifact listing.
//!
//! The v1.1 artifacts endpoint answers in an EDN-like notation: a
//! parenthesised list of maps whose keys are `:keyword`s. A fixed sequence
//! of substitutions turns the known shape of that output into JSON. It is
//! not a general EDN parser; unexpected upstream changes surface as parse
//! errors or as records that fail the suffix filter.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::github::error::BotError;

/// Suffixes of artifacts worth reporting: package tarballs and channel indexes.
pub const ARTIFACT_SUFFIXES: [&str; 3] = [".tar.gz", ".tar.bz2", "/repodata.json"];

const KEYWORD_REPLACEMENTS: [(&str, &str); 4] = [
    (":node-index", "\"node-index\":"),
    (":path", "\"path\":"),
    (":pretty-path", "\"pretty-path\":"),
    (":url", "\"url\":"),
];

/// One entry of the artifact listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtifactRecord {
    /// Download URL.
    pub url: String,
    /// Path inside the build container.
    #[serde(default)]
    pub path: Option<String>,
    /// Path shown by the CircleCI UI.
    #[serde(default, rename = "pretty-path")]
    pub pretty_path: Option<String>,
    /// Index of the parallel container that produced the artifact.
    #[serde(default, rename = "node-index")]
    pub node_index: Option<u32>,
}

impl ArtifactRecord {
    /// Whether the URL ends in one of [`ARTIFACT_SUFFIXES`].
    #[must_use]
    pub fn is_package_artifact(&self) -> bool {
        ARTIFACT_SUFFIXES
            .iter()
            .any(|suffix| self.url.ends_with(suffix))
    }
}

/// Rewrites the raw listing into JSON text.
///
/// Parentheses become brackets, adjacent maps gain a separating comma, and
/// the four known keywords are quoted.
#[must_use]
pub fn normalise_artifact_listing(raw: &str) -> String {
    let bracketed = raw.replace('(', "[").replace(')', "]");
    let separated = bracketed.replace("} ", "}, ");
    KEYWORD_REPLACEMENTS
        .iter()
        .fold(separated, |text, (keyword, quoted)| {
            text.replace(keyword, quoted)
        })
}

/// Parses a raw listing into records.
///
/// # Errors
///
/// Returns [`BotError::ArtifactListing`] when the normalised text is not a
/// JSON array of records.
pub fn parse_artifact_listing(raw: &str) -> Result<Vec<ArtifactRecord>, BotError> {
    let normalised = normalise_artifact_listing(raw);
    serde_json::from_str(&normalised).map_err(|error| BotError::ArtifactListing {
        message: error.to_string(),
    })
}

/// Parses a raw listing and keeps the URLs of package artifacts.
///
/// # Errors
///
/// Returns [`BotError::ArtifactListing`] when the listing cannot be parsed.
pub fn package_artifact_urls(raw: &str) -> Result<BTreeSet<String>, BotError> {
    Ok(parse_artifact_listing(raw)?
        .into_iter()
        .filter(ArtifactRecord::is_package_artifact)
        .map(|record| record.url)
        .collect())
}
