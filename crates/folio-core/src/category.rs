// Rule-ordered repository classification
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Category, RawRepository};

// Any non-letter separates words, so `rest_api`, `lab3` and `cli-tool` all
// count. Input is split at camelCase humps first (see `split_camel_case`).
static API_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|[^a-z])apis?(?:[^a-z]|$)").expect("valid regex"));

static COURSEWORK_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z])(?:assignments?|courses?|coursework|labs?|homeworks?)(?:[^a-z]|$)")
        .expect("valid regex")
});

static TOOLING_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z])(?:cli|themes?|tools?|tooling)(?:[^a-z]|$)").expect("valid regex")
});

const MOBILE_TOPICS: &[&str] = &["android", "ios", "mobile", "react-native", "flutter", "swiftui"];
const MOBILE_LANGUAGES: &[&str] = &["swift", "kotlin", "dart", "objective-c"];
const SYSTEMS_LANGUAGES: &[&str] = &["c", "c++", "rust", "go", "zig", "assembly"];

/// Lowercased view of the fields the rules look at
pub struct Signals {
    name: String,
    /// Name split at camelCase humps, for word matching
    name_words: String,
    description: String,
    topics: Vec<String>,
    language: Option<String>,
}

impl Signals {
    pub fn from_repo(repo: &RawRepository) -> Self {
        Self {
            name: repo.name.to_lowercase(),
            name_words: split_camel_case(&repo.name).to_lowercase(),
            description: split_camel_case(repo.description.as_deref().unwrap_or("")).to_lowercase(),
            topics: repo.topics.iter().map(|t| t.to_lowercase()).collect(),
            language: repo.language.as_ref().map(|l| l.to_lowercase()),
        }
    }

    fn has_topic(&self, wanted: &[&str]) -> bool {
        self.topics.iter().any(|t| wanted.contains(&t.as_str()))
    }

    fn language_in(&self, wanted: &[&str]) -> bool {
        self.language
            .as_deref()
            .map_or(false, |lang| wanted.contains(&lang))
    }
}

/// `RestAPI` -> `Rest API`, `myLab2` -> `my Lab2`.
///
/// Only a lowercase letter or digit followed by an uppercase one is a hump,
/// so acronym runs stay whole (`APIServer` is one word).
pub fn split_camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev: Option<char> = None;
    for ch in input.chars() {
        if let Some(p) = prev {
            if (p.is_lowercase() || p.is_ascii_digit()) && ch.is_uppercase() {
                out.push(' ');
            }
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}

pub type Rule = (fn(&Signals) -> bool, Category);

/// Evaluated top to bottom; the first predicate that holds decides.
pub const RULES: &[Rule] = &[
    (is_portfolio, Category::Portfolio),
    (is_ai, Category::Ai),
    (is_mobile, Category::Mobile),
    (is_api, Category::BackendApi),
    (is_systems, Category::Systems),
    (is_coursework, Category::Coursework),
    (is_utility, Category::Utilities),
];

/// Fallback when no rule matches
pub const DEFAULT_CATEGORY: Category = Category::GitHub;

pub fn classify(repo: &RawRepository) -> Category {
    let signals = Signals::from_repo(repo);
    RULES
        .iter()
        .find(|(matches, _)| matches(&signals))
        .map(|(_, category)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}

fn is_portfolio(s: &Signals) -> bool {
    s.name.contains("portfolio") || s.topics.iter().any(|t| t.contains("portfolio"))
}

fn is_ai(s: &Signals) -> bool {
    s.has_topic(&["ai", "ml"]) || s.name.contains("learning")
}

fn is_mobile(s: &Signals) -> bool {
    s.has_topic(MOBILE_TOPICS) || s.language_in(MOBILE_LANGUAGES)
}

fn is_api(s: &Signals) -> bool {
    API_WORD.is_match(&s.name_words) || API_WORD.is_match(&s.description)
}

fn is_systems(s: &Signals) -> bool {
    s.language_in(SYSTEMS_LANGUAGES) || s.name.contains("systems")
}

fn is_coursework(s: &Signals) -> bool {
    COURSEWORK_WORDS.is_match(&s.description)
}

fn is_utility(s: &Signals) -> bool {
    TOOLING_WORDS.is_match(&s.description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn repo(name: &str, description: Option<&str>, topics: &[&str], language: Option<&str>) -> RawRepository {
        RawRepository {
            id: 1,
            name: name.to_string(),
            owner: "sdnssr1".to_string(),
            description: description.map(str::to_string),
            url: format!("https://github.com/sdnssr1/{}", name),
            homepage: None,
            language: language.map(str::to_string),
            stars: 0,
            topics: topics.iter().map(|t| t.to_string()).collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            pushed_at: None,
            is_fork: false,
        }
    }

    #[test]
    fn test_each_rule_in_isolation() {
        assert_eq!(classify(&repo("my-portfolio", None, &[], None)), Category::Portfolio);
        assert_eq!(classify(&repo("site", None, &["portfolio-website"], None)), Category::Portfolio);
        assert_eq!(classify(&repo("Calender-AI", None, &["ai"], None)), Category::Ai);
        assert_eq!(classify(&repo("deep-learning-notes", None, &[], None)), Category::Ai);
        assert_eq!(classify(&repo("tracker", None, &["iOS"], None)), Category::Mobile);
        assert_eq!(classify(&repo("tracker", None, &[], Some("Kotlin"))), Category::Mobile);
        assert_eq!(classify(&repo("weather-api", None, &[], Some("Python"))), Category::BackendApi);
        assert_eq!(
            classify(&repo("weather", Some("A small REST API for forecasts"), &[], None)),
            Category::BackendApi
        );
        assert_eq!(classify(&repo("allocator", None, &[], Some("Rust"))), Category::Systems);
        assert_eq!(classify(&repo("operating-systems", None, &[], Some("Python"))), Category::Systems);
        assert_eq!(
            classify(&repo("cse143", Some("Homework for data structures"), &[], Some("Java"))),
            Category::Coursework
        );
        assert_eq!(
            classify(&repo("dotfiles", Some("My terminal theme"), &[], Some("Shell"))),
            Category::Utilities
        );
        assert_eq!(classify(&repo("misc", Some("Things"), &[], Some("Java"))), Category::GitHub);
    }

    #[test]
    fn test_earlier_rule_wins() {
        assert_eq!(classify(&repo("portfolio-ml", None, &["ml"], None)), Category::Portfolio);
        assert_eq!(classify(&repo("ml-api", None, &["ai"], Some("Rust"))), Category::Ai);
        assert_eq!(classify(&repo("ios-api", None, &["ios"], None)), Category::Mobile);
        assert_eq!(
            classify(&repo("rust-api", Some("Course lab"), &[], Some("Rust"))),
            Category::BackendApi
        );
        assert_eq!(
            classify(&repo("kernel", Some("OS course lab tool"), &[], Some("C"))),
            Category::Systems
        );
        assert_eq!(
            classify(&repo("hw", Some("Course assignment: a CLI tool"), &[], None)),
            Category::Coursework
        );
    }

    #[test]
    fn test_word_matching_avoids_substrings() {
        // "rapid" contains "api" and "label" contains "lab"
        assert_eq!(
            classify(&repo("notes", Some("Rapid label printing"), &[], None)),
            Category::GitHub
        );
        // topics must match exactly: "mail" is not "ai"
        assert_eq!(classify(&repo("inbox", None, &["mail"], None)), Category::GitHub);
    }

    #[test]
    fn test_underscores_digits_and_humps_separate_words() {
        assert_eq!(classify(&repo("rest_api", None, &[], None)), Category::BackendApi);
        assert_eq!(classify(&repo("RestAPI", None, &[], None)), Category::BackendApi);
        assert_eq!(classify(&repo("myApis2", None, &[], None)), Category::BackendApi);
        assert_eq!(
            classify(&repo("cse101", Some("CSE 101 lab3 solutions"), &[], None)),
            Category::Coursework
        );
        assert_eq!(
            classify(&repo("notes", Some("a cli_tool for notes"), &[], None)),
            Category::Utilities
        );
        // letters on either side still block a match
        assert_eq!(classify(&repo("capital", Some("Therapist directory"), &[], None)), Category::GitHub);
    }

    #[test]
    fn test_split_camel_case() {
        assert_eq!(split_camel_case("RestAPI"), "Rest API");
        assert_eq!(split_camel_case("myLab2Code"), "my Lab2 Code");
        assert_eq!(split_camel_case("APIServer"), "APIServer");
        assert_eq!(split_camel_case("weather-api"), "weather-api");
    }

    #[test]
    fn test_classify_is_deterministic() {
        let r = repo("portfolio-ml", Some("API course tool"), &["ai", "ios"], Some("Swift"));
        let first = classify(&r);
        for _ in 0..10 {
            assert_eq!(classify(&r), first);
        }
    }
}
