// GitHub activity panel: numbers derived from the fetched projects plus the
// third-party stat cards linked from the profile page
use std::collections::HashMap;

use crate::models::{Project, ProjectSource};

/// How many languages the panel lists
pub const TOP_LANGUAGES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySummary {
    pub repo_count: usize,
    pub total_stars: u32,
    /// Most used first; ties broken alphabetically
    pub languages: Vec<(String, usize)>,
    pub latest: Option<LatestUpdate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestUpdate {
    pub title: String,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ActivitySummary {
    /// Summarize the GitHub-sourced entries; manual ones are ignored
    pub fn from_projects(projects: &[Project]) -> Self {
        let github: Vec<&Project> = projects
            .iter()
            .filter(|p| p.source == ProjectSource::GitHub)
            .collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for project in &github {
            // first tag is the primary language when the repository has one
            if let Some(lang) = project.technologies.first() {
                *counts.entry(lang.as_str()).or_default() += 1;
            }
        }
        let mut languages: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(lang, count)| (lang.to_string(), count))
            .collect();
        languages.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        languages.truncate(TOP_LANGUAGES);

        let latest = github
            .iter()
            .filter_map(|p| p.updated_at.map(|at| (p, at)))
            .max_by_key(|(_, at)| *at)
            .map(|(p, at)| LatestUpdate {
                title: p.title.clone(),
                updated_at: at,
            });

        Self {
            repo_count: github.len(),
            total_stars: github.iter().filter_map(|p| p.stars).sum(),
            languages,
            latest,
        }
    }
}

/// Links shown alongside the activity numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLinks {
    pub profile: String,
    pub contributions: String,
    pub contribution_chart: String,
    pub streak_card: String,
    pub stats_card: String,
}

impl ProfileLinks {
    pub fn for_user(username: &str) -> Self {
        Self {
            profile: format!("https://github.com/{}", username),
            contributions: format!("https://github.com/{}?tab=contributions", username),
            contribution_chart: format!("https://ghchart.rshah.org/{}", username),
            streak_card: format!(
                "https://github-readme-streak-stats.herokuapp.com/?user={}&theme=tokyonight&hide_border=true&background=transparent",
                username
            ),
            stats_card: format!(
                "https://github-readme-stats.vercel.app/api?username={}&show_icons=true&theme=tokyonight&hide_border=true&bg_color=00000000",
                username
            ),
        }
    }
}
