//! Release error types

use std::io;

use thiserror::Error;

use crate::resource::ResourceRole;

/// Closing a resource failed
#[derive(Error, Debug)]
#[error("Failed to close {resource}: {message}")]
pub struct ReleaseError {
    /// Which resource failed to close
    pub resource: ResourceRole,
    /// Message reported by the resource
    pub message: String,
    /// Underlying I/O error (if any)
    #[source]
    pub source: Option<io::Error>,
}

impl ReleaseError {
    /// Create a release error for `resource`
    pub fn new(resource: ResourceRole, message: impl Into<String>) -> Self {
        Self {
            resource,
            message: message.into(),
            source: None,
        }
    }

    /// Create a release error from an I/O failure
    pub fn from_io(resource: ResourceRole, source: io::Error) -> Self {
        Self {
            resource,
            message: source.to_string(),
            source: Some(source),
        }
    }
}
