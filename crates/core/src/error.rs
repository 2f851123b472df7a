use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScopeDataError {
    #[error("Conflicting bindings on {member}: {detail}")]
    Conflict { member: String, detail: String },
    #[error("Unmarked parameter {position} in: {method}")]
    UnmarkedParameter { method: String, position: usize },
    #[error("Invalid subject: {0}")]
    InvalidSubject(String),
    #[error("Manifest error: {0}")]
    Manifest(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScopeDataError {
    pub(crate) fn conflict(member: impl Into<String>, detail: impl Into<String>) -> Self {
        ScopeDataError::Conflict {
            member: member.into(),
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScopeDataError>;
