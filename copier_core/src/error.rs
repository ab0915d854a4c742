//! Error types for the result set copier
//!
//! Failures are grouped by the phase of a copy that produced them:
//! - Acquisition errors: a connection or writer could not be obtained
//! - Operation errors: the copy itself failed
//! - Release errors: closing a resource failed
//!
//! A single copy call reports at most one [`OutcomeError`], which carries the
//! primary failure plus every failure it superseded.

use std::fmt;

use thiserror::Error;

pub mod acquisition;
pub mod operation;
pub mod outcome;
pub mod release;

pub use self::acquisition::AcquisitionError;
pub use self::operation::OperationError;
pub use self::outcome::OutcomeError;
pub use self::release::ReleaseError;

/// The kind of a single failure, as reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The data-source connection could not be obtained
    ConnectionError,
    /// The file writer could not be obtained
    WriterError,
    /// Copying rows failed
    CopyError,
    /// Closing a resource failed
    CloseError,
}

impl FailureKind {
    /// The phase of the copy this kind belongs to
    pub fn category(self) -> ErrorCategory {
        match self {
            Self::ConnectionError | Self::WriterError => ErrorCategory::Acquisition,
            Self::CopyError => ErrorCategory::Operation,
            Self::CloseError => ErrorCategory::Release,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ConnectionError => "ConnectionError",
            Self::WriterError => "WriterError",
            Self::CopyError => "CopyError",
            Self::CloseError => "CloseError",
        };
        f.write_str(name)
    }
}

/// Phase of a copy in which a failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Fatal, aborts the copy immediately
    Acquisition,
    /// The copy failed; resources are still released
    Operation,
    /// A resource failed to close
    Release,
}

/// A single failure observed during a copy
#[derive(Error, Debug)]
pub enum Error {
    /// Acquisition related errors
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    /// Copy operation errors
    #[error(transparent)]
    Operation(#[from] OperationError),

    /// Resource release errors
    #[error(transparent)]
    Release(#[from] ReleaseError),
}

impl Error {
    /// Kind of this failure
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Acquisition(err) => err.kind(),
            Self::Operation(_) => FailureKind::CopyError,
            Self::Release(_) => FailureKind::CloseError,
        }
    }

    /// Phase of the copy this failure belongs to
    pub fn category(&self) -> ErrorCategory {
        self.kind().category()
    }

    /// The collaborator's message, without the display prefix
    pub fn message(&self) -> String {
        match self {
            Self::Acquisition(err) => err.message(),
            Self::Operation(err) => err.message(),
            Self::Release(err) => err.message.clone(),
        }
    }
}
