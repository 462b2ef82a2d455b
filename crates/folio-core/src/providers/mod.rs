// Provider implementations for remote repository catalogs
pub mod github;

pub use github::GitHubProvider;
