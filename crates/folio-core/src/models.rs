use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::Error;

/// At most this many technology tags are kept on a project
pub const MAX_TECHNOLOGIES: usize = 5;

/// Repository record as supplied by the remote catalog. Never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRepository {
    pub id: u64,
    pub name: String,
    pub owner: String,
    pub description: Option<String>,
    pub url: String,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub stars: u32,
    pub topics: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub is_fork: bool,
}

/// Where a project entry came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProjectSource {
    Manual,
    GitHub,
}

impl std::fmt::Display for ProjectSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectSource::Manual => write!(f, "manual"),
            ProjectSource::GitHub => write!(f, "github"),
        }
    }
}

/// Display-ready gallery entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub image: String,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub stars: Option<u32>,
    pub updated_at: Option<DateTime<Utc>>,
    pub category: Category,
    pub source: ProjectSource,
}

/// Fixed set of gallery categories; ordering follows [`Category::ALL`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Portfolio,
    #[serde(rename = "AI")]
    Ai,
    Mobile,
    #[serde(rename = "Backend / API")]
    BackendApi,
    Systems,
    Coursework,
    Utilities,
    #[serde(rename = "Web Development")]
    WebDevelopment,
    GitHub,
}

impl Category {
    /// Master list, in the order categories are offered to the user
    pub const ALL: [Category; 9] = [
        Category::Portfolio,
        Category::Ai,
        Category::Mobile,
        Category::BackendApi,
        Category::Systems,
        Category::Coursework,
        Category::Utilities,
        Category::WebDevelopment,
        Category::GitHub,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Portfolio => "Portfolio",
            Category::Ai => "AI",
            Category::Mobile => "Mobile",
            Category::BackendApi => "Backend / API",
            Category::Systems => "Systems",
            Category::Coursework => "Coursework",
            Category::Utilities => "Utilities",
            Category::WebDevelopment => "Web Development",
            Category::GitHub => "GitHub",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// Active gallery filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    pub fn accepts(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
        }
        assert_eq!("backend / api".parse::<Category>().unwrap(), Category::BackendApi);
        assert!("Enterprise".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Category::BackendApi).unwrap(), "\"Backend / API\"");
        assert_eq!(serde_json::to_string(&ProjectSource::GitHub).unwrap(), "\"github\"");
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "ai".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Ai)
        );
        assert!(CategoryFilter::All.accepts(Category::Mobile));
        assert!(!CategoryFilter::Only(Category::Ai).accepts(Category::Mobile));
    }
}
