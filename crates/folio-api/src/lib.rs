// API client for the remote repository catalog
pub mod github;
pub mod retry;

pub use github::{ClientOptions, GitHubClient, GitHubError, GitHubOwner, GitHubRepo};
pub use retry::RetryConfig;
