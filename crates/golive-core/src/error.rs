use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoliveError {
    #[error("not initialized: run 'golive init'")]
    NotInitialized,

    #[error("engagement not found: {0}")]
    EngagementNotFound(String),

    #[error("engagement already exists: {0}")]
    EngagementExists(String),

    #[error("invalid engagement id '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidId(String),

    #[error("unknown phase: {0}")]
    UnknownPhase(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("malformed engagement '{id}': {reason}")]
    MalformedEngagement { id: String, reason: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl GoliveError {
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        GoliveError::MalformedEngagement {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GoliveError>;
