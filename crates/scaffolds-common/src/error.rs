use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// More than one ChEMBL target matched the free-text name.
    #[error("Found multiple targets for '{name}' ({count} matches)")]
    AmbiguousTarget { name: String, count: usize },

    #[error("Not found any targets for '{0}'")]
    TargetNotFound(String),

    /// A scaffold table row could not be read for the requested method.
    #[error("Malformed scaffold table row {line}: {reason}")]
    DecompositionOutput { line: usize, reason: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Security error: {0}")]
    Security(String),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScaffoldError {
    /// Upstream target resolution failures abort the run and are never retried.
    pub fn is_target_error(&self) -> bool {
        matches!(self, Self::AmbiguousTarget { .. } | Self::TargetNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
