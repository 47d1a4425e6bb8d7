use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid {key} value: {reason}")]
    Config { key: String, reason: String },

    #[error("MONGODB_URI is not set")]
    MissingUri,

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
