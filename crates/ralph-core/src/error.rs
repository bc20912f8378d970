use thiserror::Error;

#[derive(Debug, Error)]
pub enum RalphError {
    #[error("ralph not configured: run 'ralph setup' first")]
    NotConfigured,

    #[error("ralph_home not set: run 'ralph setup' first")]
    HomeNotSet,

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error("project not initialized: run 'ralph init' first")]
    NotInitialized,

    #[error("no prd.json found: run 'ralph prd' first")]
    PrdNotFound,

    #[error("no prd.json found: nothing to archive")]
    NothingToArchive,

    #[error("prompt template not found at {0}")]
    PromptNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RalphError>;
