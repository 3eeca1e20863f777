use std::fmt::Display;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PcError {
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },
    #[error("Extraction failed for {path}: {message}")]
    Extraction { path: String, message: String },
    #[error("Collaborator error: {0}")]
    Collaborator(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PcError {
    pub fn unsupported(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat { extension: extension.into() }
    }

    pub fn extraction(path: impl AsRef<Path>, message: impl Display) -> Self {
        Self::Extraction {
            path: path.as_ref().display().to_string(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PcError>;
