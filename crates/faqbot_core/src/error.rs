use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Invalid corpus: {0}")]
    InvalidCorpus(String),
}

pub type Result<T> = std::result::Result<T, ChatError>;
