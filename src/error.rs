use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Invalid username")]
    InvalidUsername,
    #[error("Invalid page number")]
    InvalidPage,
    #[error("Account {0} does not exist")]
    AccountNotFound(String),
    #[error("Comment {0} does not exist")]
    CommentNotFound(String),
    #[error("Node returned an error: {0}")]
    Rpc(String),
    #[error("Node request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected node response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Cannot add {left} and {right}")]
    CurrencyMismatch { left: String, right: String },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
