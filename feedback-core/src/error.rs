use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation failed")]
    Validation,

    #[error("Security error: {0}")]
    Security(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, FeedbackError>;
