// Repository -> Project transformation
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::category::classify;
use crate::models::{Project, ProjectSource, RawRepository, MAX_TECHNOLOGIES};

const PREVIEW_IMAGE_BASE: &str = "https://opengraph.githubassets.com/1";

/// Preview images that replace the generated social card for known repositories
///
/// Keys are lowercased once on construction, so lookups are a single
/// case-insensitive probe.
#[derive(Debug, Clone, Default)]
pub struct ImageOverrides {
    by_name: HashMap<String, String>,
}

impl ImageOverrides {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let by_name = entries
            .into_iter()
            .map(|(name, url)| (name.as_ref().to_lowercase(), url.into()))
            .collect();
        Self { by_name }
    }

    pub fn resolve(&self, repo_name: &str) -> Option<&str> {
        self.by_name.get(&repo_name.to_lowercase()).map(String::as_str)
    }
}

/// Lowercase, with every run of non-alphanumeric characters collapsed to `-`
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_dash = false;

    for ch in input.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            prev_dash = false;
        } else if !prev_dash && !out.is_empty() {
            out.push('-');
            prev_dash = true;
        }
    }

    while out.ends_with('-') {
        out.pop();
    }

    if out.is_empty() {
        "repo".to_string()
    } else {
        out
    }
}

/// `calender-AI` -> `Calender Ai`, `my.site` -> `My Site`
pub fn title_from_name(name: &str) -> String {
    name.split(|c: char| c == '-' || c == '.' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Only absolute http(s) homepages become demo links
pub fn demo_url(homepage: Option<&str>) -> Option<String> {
    let homepage = homepage?.trim();
    let lower = homepage.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        Some(homepage.to_string())
    } else {
        None
    }
}

pub fn preview_image_url(owner: &str, repo_name: &str) -> String {
    format!("{}/{}/{}", PREVIEW_IMAGE_BASE, owner, repo_name)
}

/// Primary language first, then topics; case-insensitive dedupe, capped
fn technologies(repo: &RawRepository) -> Vec<String> {
    let mut seen = HashSet::new();
    repo.language
        .iter()
        .chain(repo.topics.iter())
        .filter(|tag| !tag.trim().is_empty())
        .filter(|tag| seen.insert(tag.to_lowercase()))
        .take(MAX_TECHNOLOGIES)
        .cloned()
        .collect()
}

pub fn project_from_repo(repo: &RawRepository, overrides: &ImageOverrides) -> Project {
    let image = match overrides.resolve(&repo.name) {
        Some(url) => {
            debug!("Using image override for {}", repo.name);
            url.to_string()
        }
        None => preview_image_url(&repo.owner, &repo.name),
    };

    Project {
        id: format!("gh-{}-{}", repo.id, slugify(&repo.name)),
        title: title_from_name(&repo.name),
        description: repo.description.clone().unwrap_or_default(),
        technologies: technologies(repo),
        image,
        github_url: Some(repo.url.clone()),
        demo_url: demo_url(repo.homepage.as_deref()),
        stars: Some(repo.stars),
        updated_at: Some(repo.updated_at),
        category: classify(repo),
        source: ProjectSource::GitHub,
    }
}
