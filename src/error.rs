//! Error types for roster

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RosterError>;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("student {0} already exists")]
    DuplicateId(i64),

    #[error("cipher error: {0}")]
    Cipher(String),

    #[error("{0}")]
    Unsupported(String),
}

impl RosterError {
    /// Stable machine-readable code for robot-mode output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Sqlite(_) => "database",
            Self::Config(_) => "config",
            Self::InvalidRecord(_) => "invalid_record",
            Self::DuplicateId(_) => "duplicate_id",
            Self::Cipher(_) => "cipher",
            Self::Unsupported(_) => "unsupported",
        }
    }
}
