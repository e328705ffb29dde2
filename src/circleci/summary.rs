//! Extraction of CircleCI build numbers from check run summaries.

use std::sync::LazyLock;

use regex::Regex;

#[expect(
    clippy::expect_used,
    reason = "The pattern is a constant and is covered by tests"
)]
static BUILD_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"gh/bioconda/bioconda-recipes/(\d+)").expect("build URL pattern is valid")
});

/// Returns every build number referenced by a `gh/bioconda/bioconda-recipes/<n>`
/// URL in `summary`, left to right, duplicates included.
#[must_use]
pub fn parse_build_summary(summary: &str) -> Vec<String> {
    BUILD_URL_PATTERN
        .captures_iter(summary)
        .filter_map(|captures| captures.get(1))
        .map(|build| build.as_str().to_owned())
        .collect()
}
