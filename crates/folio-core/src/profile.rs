use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mapper::{demo_url, slugify, ImageOverrides};
use crate::models::{Category, Project, ProjectSource, MAX_TECHNOLOGIES};
use crate::{Error, Result};

const BUNDLED_PROFILE: &str = include_str!("../assets/profile.toml");

/// Static page content: everything except the fetched repositories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub hero: Hero,
    pub github: GitHubProfile,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub projects: Vec<ManualProject>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub resume: Vec<ResumeEntry>,
    #[serde(default)]
    pub contact: ContactInfo,
    /// Repository name -> preview image; matched ignoring case
    #[serde(default)]
    pub image_overrides: BTreeMap<String, String>,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubProfile {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Hand-authored gallery entry as written in the profile file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualProject {
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub image: String,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGroup {
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub expected: Option<String>,
    #[serde(default)]
    pub coursework: Vec<String>,
    #[serde(default)]
    pub honors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeEntry {
    pub role: String,
    pub organization: String,
    pub period: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub blurb: String,
    #[serde(default)]
    pub links: Vec<Link>,
    pub resume_pdf: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Profile {
    /// Content compiled into the binary
    pub fn bundled() -> Result<Self> {
        Self::from_toml(BUNDLED_PROFILE)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
            .map_err(|e| Error::ProfileError(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let profile: Profile = toml::from_str(contents)
            .map_err(|e| Error::ProfileError(format!("Failed to parse profile: {}", e)))?;
        // surface bad categories and id clashes at load time, not on render
        profile.manual_projects()?;
        Ok(profile)
    }

    pub fn image_overrides(&self) -> ImageOverrides {
        ImageOverrides::new(self.image_overrides.iter())
    }

    /// Manual entries as gallery projects, in file order
    pub fn manual_projects(&self) -> Result<Vec<Project>> {
        let mut ids = HashSet::new();
        let mut projects = Vec::with_capacity(self.projects.len());

        for entry in &self.projects {
            let project = entry.to_project()?;
            if !ids.insert(project.id.clone()) {
                return Err(Error::ProfileError(format!(
                    "Duplicate project id: {}",
                    project.id
                )));
            }
            projects.push(project);
        }

        Ok(projects)
    }
}

impl ManualProject {
    pub fn to_project(&self) -> Result<Project> {
        let category: Category = self.category.parse()?;
        let id = match &self.id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => format!("manual-{}", slugify(&self.title)),
        };

        Ok(Project {
            id,
            title: self.title.clone(),
            description: self.description.clone(),
            technologies: self.technologies.iter().take(MAX_TECHNOLOGIES).cloned().collect(),
            image: self.image.clone(),
            github_url: self.github_url.clone(),
            demo_url: demo_url(self.demo_url.as_deref()),
            stars: None,
            updated_at: None,
            category,
            source: ProjectSource::Manual,
        })
    }
}
