use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LauncherError {
    #[error("supervisor connection failed: {0}")]
    Connection(String),

    #[error("failed to start '{0}': {1}")]
    Start(String, String),

    #[error("app '{0}' did not become ready: {1}")]
    Readiness(String, String),

    #[error("config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("no port configured for app '{0}'")]
    MissingPort(String),

    #[error("supervisor operation failed: {0}")]
    Supervisor(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, LauncherError>;
