//! Acquisition error types

use std::io;
use std::path::Path;

use thiserror::Error;

use super::FailureKind;

/// A connection or writer could not be obtained
#[derive(Error, Debug)]
pub enum AcquisitionError {
    /// The data-source connection could not be opened
    #[error("Failed to acquire connection: {message}")]
    Connection { message: String },

    /// The destination writer could not be opened
    #[error("Failed to open writer for '{file_name}': {message}")]
    Writer {
        file_name: String,
        message: String,
        #[source]
        source: Option<io::Error>,
    },
}

impl AcquisitionError {
    /// Create a connection acquisition error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a writer acquisition error
    pub fn writer(file_name: &str, message: impl Into<String>) -> Self {
        Self::Writer {
            file_name: file_name.to_string(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a writer acquisition error from an I/O failure on `path`
    pub fn writer_io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Writer {
            file_name: path.as_ref().display().to_string(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Kind of this failure
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Connection { .. } => FailureKind::ConnectionError,
            Self::Writer { .. } => FailureKind::WriterError,
        }
    }

    /// The underlying message, without the display prefix
    pub fn message(&self) -> String {
        match self {
            Self::Connection { message } | Self::Writer { message, .. } => message.clone(),
        }
    }
}
