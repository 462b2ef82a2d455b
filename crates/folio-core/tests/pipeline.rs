use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use folio_core::{
    load_github_projects, spawn_github_load, Category, CategoryFilter, Error, GalleryState,
    Profile, ProjectSource, RawRepository, RepoSource, Result,
};

const PROFILE: &str = r#"
    [hero]
    name = "Ada"
    title = "Engineer"
    description = "Builds things"

    [github]
    username = "ada"

    [image_overrides]
    "Weather-API" = "/weather.png"

    [[projects]]
    title = "Weather Api"
    description = "Hand-written entry for the forecast service"
    category = "Web Development"
    demo_url = "https://weather.example.com"
"#;

fn repo(id: u64, name: &str, description: &str, topics: &[&str], language: Option<&str>) -> RawRepository {
    RawRepository {
        id,
        name: name.to_string(),
        owner: "ada".to_string(),
        description: Some(description.to_string()),
        url: format!("https://github.com/ada/{}", name),
        homepage: None,
        language: language.map(str::to_string),
        stars: id as u32,
        topics: topics.iter().map(|t| t.to_string()).collect(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        pushed_at: None,
        is_fork: false,
    }
}

struct FixedSource(Vec<RawRepository>);

#[async_trait]
impl RepoSource for FixedSource {
    async fn fetch_repositories(&self, _username: &str) -> Result<Vec<RawRepository>> {
        Ok(self.0.clone())
    }
}

struct FailingSource;

#[async_trait]
impl RepoSource for FailingSource {
    async fn fetch_repositories(&self, _username: &str) -> Result<Vec<RawRepository>> {
        Err(Error::ApiError("rate limited".into()))
    }
}

fn catalog() -> Vec<RawRepository> {
    let mut forked = repo(99, "someone-elses-tool", "cli helpers", &[], None);
    forked.is_fork = true;

    vec![
        repo(1, "Calender-AI", "Smart scheduling", &["ai"], Some("TypeScript")),
        repo(2, "weather-api", "Forecast service", &[], Some("Python")),
        repo(3, "kernel-playground", "Toy scheduler", &[], Some("Rust")),
        repo(4, "dotfiles", "Shell themes and tools", &[], Some("Shell")),
        forked,
    ]
}

fn initial_state() -> (Profile, GalleryState) {
    let profile = Profile::from_toml(PROFILE).unwrap();
    let manual = profile.manual_projects().unwrap();
    (profile, GalleryState::new(manual))
}

#[tokio::test]
async fn fetched_repositories_merge_behind_manual_entries() {
    let (profile, mut gallery) = initial_state();
    let source = FixedSource(catalog());

    let fetched = load_github_projects(&source, "ada", &profile.image_overrides()).await;
    // fork dropped
    assert_eq!(fetched.len(), 4);
    gallery.apply_fetch_result(fetched);

    let items = gallery.items();
    assert_eq!(items[0].source, ProjectSource::Manual);
    assert_eq!(items[0].title, "Weather Api");
    // the fetched "weather-api" collides with the manual title
    assert_eq!(items.len(), 4);
    assert!(items.iter().all(|p| p.id != "gh-2-weather-api"));

    let calendar = gallery.find("gh-1-calender-ai").unwrap();
    assert_eq!(calendar.title, "Calender Ai");
    assert_eq!(calendar.category, Category::Ai);
    assert_eq!(calendar.image, "https://opengraph.githubassets.com/1/ada/Calender-AI");

    assert_eq!(gallery.find("gh-3-kernel-playground").unwrap().category, Category::Systems);
    assert_eq!(gallery.find("gh-4-dotfiles").unwrap().category, Category::Utilities);

    let ids: HashSet<&str> = items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), items.len());
}

#[tokio::test]
async fn refetch_replaces_github_slice() {
    let (profile, mut gallery) = initial_state();
    let overrides = profile.image_overrides();

    let first = load_github_projects(&FixedSource(catalog()), "ada", &overrides).await;
    gallery.apply_fetch_result(first);
    let once = gallery.items().to_vec();

    let again = load_github_projects(&FixedSource(catalog()), "ada", &overrides).await;
    gallery.apply_fetch_result(again);
    assert_eq!(gallery.items(), once.as_slice());

    let shrunk = load_github_projects(
        &FixedSource(vec![repo(3, "kernel-playground", "Toy scheduler", &[], Some("Rust"))]),
        "ada",
        &overrides,
    )
    .await;
    gallery.apply_fetch_result(shrunk);
    assert_eq!(gallery.items().len(), 2);
}

#[tokio::test]
async fn failed_fetch_leaves_manual_entries() {
    let (profile, mut gallery) = initial_state();
    let before = gallery.items().to_vec();

    let fetched = load_github_projects(&FailingSource, "ada", &profile.image_overrides()).await;
    assert!(fetched.is_empty());
    gallery.apply_fetch_result(fetched);

    assert_eq!(gallery.items(), before.as_slice());
    assert_eq!(gallery.total_pages(), 1);
}

#[tokio::test]
async fn background_load_feeds_the_gallery() {
    let (profile, mut gallery) = initial_state();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let handle = spawn_github_load(
        Arc::new(FixedSource(catalog())),
        profile.github.username.clone(),
        profile.image_overrides(),
        tx,
    );

    let fetched = rx.recv().await.unwrap();
    handle.finished().await;
    gallery.apply_fetch_result(fetched);

    assert_eq!(
        gallery.categories(),
        vec![
            CategoryFilter::All,
            CategoryFilter::Only(Category::Ai),
            CategoryFilter::Only(Category::Systems),
            CategoryFilter::Only(Category::Utilities),
            CategoryFilter::Only(Category::WebDevelopment),
        ]
    );
}

#[tokio::test]
async fn large_catalog_pages_and_filters() {
    let (profile, mut gallery) = initial_state();
    let repos: Vec<RawRepository> = (10..23)
        .map(|id| repo(id, &format!("tool-{}", id), "misc", &[], None))
        .collect();

    let fetched = load_github_projects(&FixedSource(repos), "ada", &profile.image_overrides()).await;
    gallery.apply_fetch_result(fetched);

    // 1 manual + 13 fetched
    assert_eq!(gallery.items().len(), 14);
    assert_eq!(gallery.total_pages(), 3);

    gallery.set_page(3);
    assert_eq!(gallery.page_items().len(), 2);

    gallery.set_filter(CategoryFilter::Only(Category::GitHub));
    assert_eq!(gallery.page(), 1);
    assert_eq!(gallery.visible().len(), 13);

    gallery.set_search("  TOOL 2 ");
    assert_eq!(gallery.visible().len(), 3);
}
