//! Error type for task operations and persistence.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoError {
    /// Task text was empty or whitespace only.
    #[error("task text cannot be empty")]
    EmptyText,

    #[error("no task at position {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TodoError>;
