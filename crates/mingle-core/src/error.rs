use thiserror::Error;

pub type Result<T> = std::result::Result<T, MingleError>;

#[derive(Debug, Error)]
pub enum MingleError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid edge: {0}")]
    InvalidEdge(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl MingleError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidEdge(_) => "INVALID_EDGE",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Sqlite(_) => "SQLITE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn profile_not_found(id: i64) -> Self {
        Self::NotFound(format!("profile {id}"))
    }

    pub fn mutex_poisoned(what: &str) -> Self {
        Self::Internal(format!("{what} mutex poisoned"))
    }
}
