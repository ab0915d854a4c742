//! Closeable resources taking part in a copy

use std::fmt;

use crate::error::ReleaseError;

/// Which of the two copy resources a value refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceRole {
    /// The data-source connection
    Connection,
    /// The destination file writer
    Writer,
}

impl fmt::Display for ResourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection => f.write_str("connection"),
            Self::Writer => f.write_str("writer"),
        }
    }
}

/// A resource that must be closed exactly once after use
pub trait Resource {
    /// Release the resource
    fn close(&mut self) -> Result<(), ReleaseError>;
}

impl<R: Resource + ?Sized> Resource for Box<R> {
    fn close(&mut self) -> Result<(), ReleaseError> {
        (**self).close()
    }
}
