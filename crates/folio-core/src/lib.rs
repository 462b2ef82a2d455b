// Gallery logic lives here: classify, map, reconcile, filter and page
pub mod activity;
pub mod category;
pub mod config;
pub mod contact;
pub mod error;
pub mod export;
pub mod gallery;
pub mod loader;
pub mod mapper;
pub mod models;
pub mod profile;
pub mod providers;
pub mod reconcile;
pub mod source;

pub use activity::{ActivitySummary, ProfileLinks};
pub use category::classify;
pub use config::Config;
pub use contact::{ContactForm, ContactMessage, Field, FieldError};
pub use error::Error;
pub use export::{ExportFormat, Exporter};
pub use gallery::{GalleryState, PAGE_SIZE};
pub use loader::{load_github_projects, spawn_github_load, LoadHandle};
pub use mapper::{project_from_repo, ImageOverrides};
pub use models::{Category, CategoryFilter, Project, ProjectSource, RawRepository};
pub use profile::Profile;
pub use providers::GitHubProvider;
pub use reconcile::reconcile;
pub use source::RepoSource;

/// Result type alias for the crate's fallible operations
pub type Result<T> = std::result::Result<T, Error>;
