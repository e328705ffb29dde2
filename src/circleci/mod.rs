//! CircleCI artifact lookup.
//!
//! Check run summaries embed CircleCI build URLs; this module extracts the
//! build numbers and resolves each build to the package artifacts it
//! uploaded.

mod client;
mod listing;
mod summary;

pub use client::{ArtifactSource, CircleCiClient, DEFAULT_CIRCLECI_API_BASE};
pub use listing::{
    ARTIFACT_SUFFIXES, ArtifactRecord, normalise_artifact_listing, package_artifact_urls,
    parse_artifact_listing,
};
pub use summary::parse_build_summary;

#[cfg(test)]
pub use client::MockArtifactSource;
