use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context};
use clap::Parser;
use folio_core::{
    load_github_projects, spawn_github_load, CategoryFilter, Config, Exporter, GalleryState,
    GitHubProvider, Profile, Project, RepoSource,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "Terminal portfolio with a live GitHub project gallery", long_about = None)]
struct Cli {
    /// GitHub account whose repositories fill the gallery
    #[arg(long, short = 'u', global = true)]
    username: Option<String>,

    /// GitHub token, raises the API rate limit
    #[arg(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Profile TOML to use instead of the bundled one
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip the GitHub fetch and show manual projects only
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List one page of the project gallery
    Projects {
        /// Category label, e.g. "AI" or "Backend / API"
        #[arg(long, short)]
        category: Option<String>,

        /// Case-insensitive match on title, description and technologies
        #[arg(long, short)]
        search: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the categories present in the gallery
    Categories,
    /// Show one project
    Show {
        /// Project id, e.g. gh-42-calender-ai
        id: String,
    },
    /// Export the gallery (.json, .csv or .md)
    Export {
        path: PathBuf,

        #[arg(long, short)]
        category: Option<String>,

        #[arg(long, short)]
        search: Option<String>,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand)]
enum ConfigAction {
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print where the config file lives
    Path,
}

/// Config, profile and account after flags are layered over the files
struct Settings {
    config: Config,
    profile: Profile,
    username: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // the TUI owns the terminal, so its logs go to a file
    init_logging(cli.command.is_none())?;

    match &cli.command {
        Some(Commands::Config { action }) => run_config(&cli, action),
        Some(Commands::Projects {
            category,
            search,
            page,
            json,
        }) => {
            let settings = resolve_settings(&cli)?;
            let mut gallery = load_gallery(&settings, cli.offline).await?;
            apply_filters(&mut gallery, category.as_deref(), search.as_deref())?;
            gallery.set_page(*page);
            print_page(&gallery, *json)
        }
        Some(Commands::Categories) => {
            let settings = resolve_settings(&cli)?;
            let gallery = load_gallery(&settings, cli.offline).await?;
            for filter in gallery.categories() {
                let count = gallery
                    .items()
                    .iter()
                    .filter(|p| filter.accepts(p.category))
                    .count();
                println!("{:<16} {}", filter.label(), count);
            }
            Ok(())
        }
        Some(Commands::Show { id }) => {
            let settings = resolve_settings(&cli)?;
            let gallery = load_gallery(&settings, cli.offline).await?;
            let project = gallery
                .find(id)
                .ok_or_else(|| folio_core::Error::NotFound(id.clone()))?;
            print_project(project);
            Ok(())
        }
        Some(Commands::Export {
            path,
            category,
            search,
        }) => {
            let settings = resolve_settings(&cli)?;
            let mut gallery = load_gallery(&settings, cli.offline).await?;
            apply_filters(&mut gallery, category.as_deref(), search.as_deref())?;
            let projects: Vec<Project> = gallery.visible().into_iter().cloned().collect();
            Exporter::export_to_file(&projects, path)?;
            println!("Exported {} projects to {}", projects.len(), path.display());
            Ok(())
        }
        None => run_interactive(&cli).await,
    }
}

fn init_logging(to_file: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "folio=info".into());

    if to_file {
        let dir = dirs::cache_dir()
            .context("Could not find cache directory")?
            .join("folio");
        std::fs::create_dir_all(&dir)?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("folio.log"))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn resolve_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(token) = &cli.token {
        config.github.token = Some(token.clone());
    }

    let profile = match cli.profile.as_ref().or(config.profile.path.as_ref()) {
        Some(path) => Profile::load(path)?,
        None => Profile::bundled()?,
    };

    let username = cli
        .username
        .clone()
        .or_else(|| config.github.username.clone())
        .unwrap_or_else(|| profile.github.username.clone());

    Ok(Settings {
        config,
        profile,
        username,
    })
}

fn provider(settings: &Settings) -> anyhow::Result<GitHubProvider> {
    Ok(GitHubProvider::new(
        settings.config.client_options(),
        settings.config.fetch.per_page,
    )?)
}

/// Manual entries, merged with one GitHub fetch unless offline
async fn load_gallery(settings: &Settings, offline: bool) -> anyhow::Result<GalleryState> {
    let mut gallery = GalleryState::new(settings.profile.manual_projects()?);

    if !offline {
        let source = provider(settings)?;
        let fetched = load_github_projects(
            &source,
            &settings.username,
            &settings.profile.image_overrides(),
        )
        .await;
        gallery.apply_fetch_result(fetched);
    }

    Ok(gallery)
}

fn apply_filters(
    gallery: &mut GalleryState,
    category: Option<&str>,
    search: Option<&str>,
) -> anyhow::Result<()> {
    if let Some(category) = category {
        let filter: CategoryFilter = category.parse().with_context(|| {
            let known: Vec<String> = gallery.categories().iter().map(|c| c.to_string()).collect();
            format!("Available here: {}", known.join(", "))
        })?;
        gallery.set_filter(filter);
    }
    if let Some(search) = search {
        gallery.set_search(search);
    }
    Ok(())
}

fn print_page(gallery: &GalleryState, json: bool) -> anyhow::Result<()> {
    let items = gallery.page_items();

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    println!(
        "Page {} of {} · {} projects ({})",
        gallery.page(),
        gallery.total_pages(),
        gallery.visible().len(),
        gallery.filter()
    );
    if items.is_empty() {
        println!("No projects match.");
    }
    for project in items {
        let stars = project
            .stars
            .map(|s| format!("  ★ {}", s))
            .unwrap_or_default();
        println!();
        println!("  {}  [{}]{}", project.title, project.category, stars);
        println!("    id: {}", project.id);
        if !project.description.is_empty() {
            println!("    {}", project.description);
        }
        if !project.technologies.is_empty() {
            println!("    {}", project.technologies.join(", "));
        }
    }

    Ok(())
}

fn print_project(project: &Project) {
    println!("{}", project.title);
    println!("  id:         {}", project.id);
    println!("  category:   {}", project.category);
    println!("  source:     {}", project.source);
    if !project.description.is_empty() {
        println!("  about:      {}", project.description);
    }
    if !project.technologies.is_empty() {
        println!("  tech:       {}", project.technologies.join(", "));
    }
    if let Some(stars) = project.stars {
        println!("  stars:      {}", stars);
    }
    if let Some(updated) = project.updated_at {
        println!("  updated:    {}", updated.format("%Y-%m-%d"));
    }
    if let Some(url) = &project.github_url {
        println!("  code:       {}", url);
    }
    if let Some(url) = &project.demo_url {
        println!("  demo:       {}", url);
    }
    println!("  image:      {}", project.image);
}

fn run_config(cli: &Cli, action: &ConfigAction) -> anyhow::Result<()> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };

    match action {
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save_to(&path)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

async fn run_interactive(cli: &Cli) -> anyhow::Result<()> {
    let settings = resolve_settings(cli)?;
    let app = folio_tui::App::new(settings.profile.clone(), &settings.username)?;
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

    let load = if cli.offline {
        None
    } else {
        let source: Arc<dyn RepoSource> = Arc::new(provider(&settings)?);
        tracing::info!("Loading GitHub projects for {}", settings.username);
        Some(spawn_github_load(
            source,
            settings.username.clone(),
            settings.profile.image_overrides(),
            tx,
        ))
    };

    folio_tui::run_tui(app, rx, load).await
}
