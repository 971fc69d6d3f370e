use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File '{}' not found.", .0.display())]
    FileNotFound(PathBuf),

    #[error("File '{0}' is not a valid .csv or .txt file.")]
    UnsupportedExtension(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl ImportError {
    /// Errors raised before any row is read; the caller shows usage for these.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::UnsupportedExtension(_))
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
