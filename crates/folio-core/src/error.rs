use thiserror::Error;

/// Everything that can go wrong while assembling the portfolio
///
/// Catalog failures never reach the gallery: the loader swallows them and
/// degrades to manual entries. These variants surface from configuration,
/// profile and export paths.
#[derive(Error, Debug)]
pub enum Error {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Profile error: {0}")]
    ProfileError(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Export failed: {0}")]
    ExportError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<folio_api::GitHubError> for Error {
    fn from(err: folio_api::GitHubError) -> Self {
        Error::ApiError(err.to_string())
    }
}
