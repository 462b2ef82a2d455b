// GitHub provider - bridges the API client with the RepoSource trait
use async_trait::async_trait;
use folio_api::{ClientOptions, GitHubClient, GitHubRepo};

use crate::{models::RawRepository, source::RepoSource, Result};

/// Wrapper around GitHubClient that implements RepoSource
pub struct GitHubProvider {
    client: GitHubClient,
    per_page: u32,
}

impl GitHubProvider {
    pub fn new(options: ClientOptions, per_page: u32) -> Result<Self> {
        Ok(Self {
            client: GitHubClient::with_options(options)?,
            per_page,
        })
    }
}

#[async_trait]
impl RepoSource for GitHubProvider {
    async fn fetch_repositories(&self, username: &str) -> Result<Vec<RawRepository>> {
        let repos = self.client.list_user_repos(username, self.per_page).await?;
        Ok(repos.into_iter().map(github_to_raw).collect())
    }
}

/// Convert the GitHub wire record to the platform-neutral repository model
fn github_to_raw(gh: GitHubRepo) -> RawRepository {
    RawRepository {
        id: gh.id,
        name: gh.name,
        owner: gh.owner.login,
        description: gh.description,
        url: gh.html_url,
        homepage: gh.homepage,
        language: gh.language,
        stars: gh.stargazers_count,
        topics: gh.topics,
        created_at: gh.created_at,
        updated_at: gh.updated_at,
        pushed_at: gh.pushed_at,
        is_fork: gh.fork,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_github_projects;
    use crate::mapper::ImageOverrides;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn provider_answering(status_line: &'static str, body: &'static str) -> GitHubProvider {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        GitHubProvider::new(
            ClientOptions {
                base_url: format!("http://{}", addr),
                timeout: Some(Duration::from_secs(5)),
                ..ClientOptions::default()
            },
            100,
        )
        .unwrap()
    }

    #[test]
    fn test_github_to_raw_keeps_identity_fields() {
        let gh: GitHubRepo = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "weather-api",
            "full_name": "sdnssr1/weather-api",
            "owner": { "login": "sdnssr1" },
            "description": "Forecasts",
            "html_url": "https://github.com/sdnssr1/weather-api",
            "homepage": "https://weather.example.com",
            "language": "Python",
            "stargazers_count": 12,
            "topics": ["fastapi"],
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-02-01T00:00:00Z",
            "pushed_at": "2024-02-01T00:00:00Z",
            "fork": false
        }))
        .unwrap();

        let raw = github_to_raw(gh);
        assert_eq!(raw.id, 7);
        assert_eq!(raw.owner, "sdnssr1");
        assert_eq!(raw.url, "https://github.com/sdnssr1/weather-api");
        assert_eq!(raw.stars, 12);
        assert!(!raw.is_fork);
    }

    #[tokio::test]
    async fn test_error_status_loads_no_projects() {
        for status_line in ["404 Not Found", "403 Forbidden", "500 Internal Server Error"] {
            let provider = provider_answering(status_line, r#"{"message":"nope"}"#).await;
            assert!(provider.fetch_repositories("sdnssr1").await.is_err());

            let projects =
                load_github_projects(&provider, "sdnssr1", &ImageOverrides::default()).await;
            assert!(projects.is_empty(), "{} should load nothing", status_line);
        }
    }

    #[tokio::test]
    async fn test_success_status_loads_projects() {
        let provider = provider_answering(
            "200 OK",
            r#"[{"id": 9, "name": "rest_api", "owner": {"login": "sdnssr1"},
                "description": "Orders service", "html_url": "https://github.com/sdnssr1/rest_api",
                "homepage": null, "language": "Go",
                "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-02-01T00:00:00Z"}]"#,
        )
        .await;

        let projects = load_github_projects(&provider, "sdnssr1", &ImageOverrides::default()).await;
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, "gh-9-rest-api");
        assert_eq!(projects[0].category, crate::models::Category::BackendApi);
    }
}
