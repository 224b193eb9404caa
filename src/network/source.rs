//! Repository source selection.

use std::path::{Path, PathBuf};

use super::classifier::NetworkClass;

/// Canonical location of the installed project.
pub const CANONICAL_URL: &str = "https://github.com/shuakami/wuhu-home-Caidan.git";

/// Mirror for restricted networks.
pub const MIRROR_URL: &str = "https://githubfast.com/shuakami/wuhu-home-Caidan.git";

/// A repository reachable through a canonical URL and a mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySource {
    /// URL used on unrestricted networks.
    pub canonical_url: String,
    /// URL used on restricted networks.
    pub mirror_url: String,
    /// Repository name shared by both URLs.
    pub name: String,
}

impl Default for RepositorySource {
    fn default() -> Self {
        Self::new(CANONICAL_URL, MIRROR_URL)
    }
}

impl RepositorySource {
    pub fn new(canonical_url: &str, mirror_url: &str) -> Self {
        Self {
            canonical_url: canonical_url.to_string(),
            mirror_url: mirror_url.to_string(),
            name: repository_name(canonical_url),
        }
    }

    /// Pick the URL matching the network class.
    pub fn select(&self, class: NetworkClass) -> SelectedSource {
        let url = match class {
            NetworkClass::International => &self.canonical_url,
            NetworkClass::Domestic => &self.mirror_url,
        };
        tracing::debug!("Selected {} for {} network", url, class);

        SelectedSource {
            url: url.clone(),
            name: self.name.clone(),
            class,
        }
    }
}

/// The URL chosen for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedSource {
    /// Clone URL.
    pub url: String,
    /// Repository name, also the destination directory name.
    pub name: String,
    /// Classification the choice was based on.
    pub class: NetworkClass,
}

impl SelectedSource {
    /// Where the repository lives under `base`.
    pub fn destination(&self, base: &Path) -> PathBuf {
        base.join(&self.name)
    }
}

/// Last path segment of a clone URL, without a `.git` suffix.
pub fn repository_name(url: &str) -> String {
    let segment = url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(url);
    segment.strip_suffix(".git").unwrap_or(segment).to_string()
}
