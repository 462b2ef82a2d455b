// Merge hand-authored entries with freshly fetched repositories
use std::collections::HashSet;

use tracing::debug;

use crate::models::{Project, ProjectSource};

/// Replace the GitHub slice of `current` with `fetched`
///
/// Manual entries are kept untouched and first. A fetched project is dropped
/// when its title matches a manual title (ignoring case) or when its id is
/// already taken.
pub fn reconcile(current: &[Project], fetched: Vec<Project>) -> Vec<Project> {
    let manual: Vec<Project> = current
        .iter()
        .filter(|p| p.source == ProjectSource::Manual)
        .cloned()
        .collect();

    let manual_titles: HashSet<String> = manual.iter().map(|p| p.title.to_lowercase()).collect();
    let mut ids: HashSet<String> = manual.iter().map(|p| p.id.clone()).collect();

    let mut merged = manual;
    for project in fetched {
        if manual_titles.contains(&project.title.to_lowercase()) {
            debug!("Manual entry covers {}, skipping fetched copy", project.title);
            continue;
        }
        if !ids.insert(project.id.clone()) {
            debug!("Duplicate project id {}, skipping", project.id);
            continue;
        }
        merged.push(project);
    }

    merged
}
