//! Copy operation error types

use std::io;

use thiserror::Error;

/// The copy itself failed
#[derive(Error, Debug)]
pub enum OperationError {
    /// The data source reported a failure while producing rows
    #[error("Copy failed: {message}")]
    Copy { message: String },

    /// Writing copied output failed
    #[error("Copy failed while writing output: {source}")]
    Output {
        #[from]
        source: io::Error,
    },
}

impl OperationError {
    /// Create a copy error
    pub fn copy(message: impl Into<String>) -> Self {
        Self::Copy {
            message: message.into(),
        }
    }

    /// The underlying message, without the display prefix
    pub fn message(&self) -> String {
        match self {
            Self::Copy { message } => message.clone(),
            Self::Output { source } => source.to_string(),
        }
    }
}
