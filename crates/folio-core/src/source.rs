use crate::{models::RawRepository, Result};

/// Where remote repositories come from
///
/// Implemented by the GitHub provider; tests substitute a mock so the
/// loader can be exercised without network access.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepoSource: Send + Sync {
    /// Every repository owned by `username`, forks included
    async fn fetch_repositories(&self, username: &str) -> Result<Vec<RawRepository>>;
}
