use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UniverseError {
    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("{package}:{version} does not exist")]
    VersionNotFound { package: String, version: String },

    #[error("Malformed store: {0}")]
    MalformedStore(String),

    #[error("Missing descriptor: {}", .0.display())]
    MissingDescriptor(PathBuf),

    #[error("Malformed descriptor {}: {reason}", path.display())]
    MalformedDescriptor { path: PathBuf, reason: String },

    #[error("Failed to clone {} to {}: {source}", from.display(), to.display())]
    Clone {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl UniverseError {
    /// Whether the error only concerns the package being processed.
    ///
    /// The update orchestrator downgrades these to problems in its report
    /// and moves on. Everything else means the store cannot be trusted and
    /// aborts the run.
    pub fn is_package_scoped(&self) -> bool {
        matches!(
            self,
            UniverseError::NotFound(_)
                | UniverseError::VersionNotFound { .. }
                | UniverseError::Clone { .. }
                | UniverseError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, UniverseError>;
