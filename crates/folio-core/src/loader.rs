// Fetch-and-map pipeline for the GitHub slice of the gallery
use std::sync::Arc;

use futures::future::{AbortHandle, Abortable};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::mapper::{project_from_repo, ImageOverrides};
use crate::models::Project;
use crate::source::RepoSource;

/// Fetch, drop forks and map to projects.
///
/// Failures are logged and yield an empty list, so "no repositories" and
/// "fetch failed" look the same to the caller.
pub async fn load_github_projects(
    source: &dyn RepoSource,
    username: &str,
    overrides: &ImageOverrides,
) -> Vec<Project> {
    match source.fetch_repositories(username).await {
        Ok(repos) => {
            let projects: Vec<Project> = repos
                .iter()
                .filter(|repo| !repo.is_fork)
                .map(|repo| project_from_repo(repo, overrides))
                .collect();
            info!(
                "Loaded {} GitHub projects for {} ({} forks skipped)",
                projects.len(),
                username,
                repos.len() - projects.len()
            );
            projects
        }
        Err(e) => {
            warn!("Error fetching GitHub repositories for {}: {}", username, e);
            Vec::new()
        }
    }
}

/// Background load tied to its consumer's lifetime
pub struct LoadHandle {
    abort: AbortHandle,
    task: Option<JoinHandle<()>>,
}

impl LoadHandle {
    /// Discard the result if it has not been delivered yet
    pub fn cancel(&self) {
        self.abort.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |task| task.is_finished())
    }

    /// Wait for the task to deliver or drop its result
    pub async fn finished(mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("GitHub load task failed: {}", e);
            }
        }
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

/// Run [`load_github_projects`] on a tokio task and send the result to `tx`
pub fn spawn_github_load(
    source: Arc<dyn RepoSource>,
    username: String,
    overrides: ImageOverrides,
    tx: UnboundedSender<Vec<Project>>,
) -> LoadHandle {
    let (abort, registration) = AbortHandle::new_pair();
    let cancelled = abort.clone();

    let load = Abortable::new(
        async move { load_github_projects(source.as_ref(), &username, &overrides).await },
        registration,
    );

    let task = tokio::spawn(async move {
        match load.await {
            Ok(projects) if !cancelled.is_aborted() => {
                if tx.send(projects).is_err() {
                    debug!("Gallery went away before the GitHub load finished");
                }
            }
            _ => debug!("GitHub load cancelled, result discarded"),
        }
    });

    LoadHandle {
        abort,
        task: Some(task),
    }
}
