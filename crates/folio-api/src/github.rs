use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::retry::{is_retryable_status, with_retry, RetryConfig};

const GITHUB_API_BASE: &str = "https://api.github.com";

/// GitHub caps `per_page` at 100
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// 5xx or 408: the server may answer differently next time
    #[error("Server error {status}: {body}")]
    ServerError {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Rate limit exceeded")]
    RateLimitExceeded { reset_at: Option<i64> },

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl GitHubError {
    /// Whether a retry has any chance of a different outcome
    pub fn is_retryable(&self) -> bool {
        match self {
            GitHubError::NetworkError(_) | GitHubError::ServerError { .. } => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Construction options for [`GitHubClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub token: Option<String>,
    /// API root, overridable for GitHub Enterprise
    pub base_url: String,
    /// `None` leaves the platform's default network timeout in place
    pub timeout: Option<Duration>,
    pub retry: RetryConfig,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            token: None,
            base_url: GITHUB_API_BASE.to_string(),
            timeout: None,
            retry: RetryConfig::default(),
        }
    }
}

pub struct GitHubClient {
    client: reqwest::Client,
    token: Option<String>,
    base_url: String,
    retry_config: RetryConfig,
}

impl GitHubClient {
    pub fn with_options(options: ClientOptions) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(concat!("folio/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GitHubError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            token: options.token,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            retry_config: options.retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the public repositories owned by `username`, most recently
    /// updated first. Forks are included; callers decide what to keep.
    pub async fn list_user_repos(&self, username: &str, per_page: u32) -> Result<Vec<GitHubRepo>> {
        let url = format!("{}/users/{}/repos", self.base_url, urlencoding::encode(username));
        let per_page = per_page.clamp(1, MAX_PER_PAGE).to_string();

        with_retry(&self.retry_config, GitHubError::is_retryable, || async {
            let mut request = self
                .client
                .get(&url)
                .query(&[("sort", "updated"), ("per_page", per_page.as_str())]);

            if let Some(ref token) = self.token {
                request = request.bearer_auth(token);
            }

            let response = request.send().await?;
            let status = response.status();

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(GitHubError::NotFound(username.to_string()));
            }

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS
                || (status == reqwest::StatusCode::FORBIDDEN && quota_exhausted(response.headers()))
            {
                return Err(GitHubError::RateLimitExceeded {
                    reset_at: header_i64(response.headers(), "x-ratelimit-reset"),
                });
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                if is_retryable_status(status) {
                    return Err(GitHubError::ServerError { status, body });
                }
                return Err(GitHubError::RequestFailed(format!("Status {}: {}", status, body)));
            }

            let body = response.text().await?;
            let repos: Vec<GitHubRepo> = serde_json::from_str(&body)?;
            debug!("GitHub returned {} repositories for {}", repos.len(), username);
            Ok(repos)
        })
        .await
    }
}

fn header_i64(headers: &reqwest::header::HeaderMap, name: &str) -> Option<i64> {
    headers.get(name)?.to_str().ok()?.parse().ok()
}

fn quota_exhausted(headers: &reqwest::header::HeaderMap) -> bool {
    header_i64(headers, "x-ratelimit-remaining") == Some(0)
}

/// Repository record as returned by `GET /users/{username}/repos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub owner: GitHubOwner,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub topics: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fork: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubOwner {
    pub login: String,
}
