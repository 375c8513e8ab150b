//! Error types for the ftsearch engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FtsError>;

#[derive(Error, Debug)]
pub enum FtsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input error: {0}")]
    Input(String),

    #[error("corrupt database: {0}")]
    Corrupt(String),

    #[error("word too long: {0:?} (max {1} bytes)")]
    WordTooLong(String, usize),

    #[error("not found")]
    NotFound,
}
