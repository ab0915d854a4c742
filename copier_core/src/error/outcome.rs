//! The single error value a copy call reports

use std::error::Error as StdError;
use std::fmt;

use super::{Error, FailureKind};

/// Outcome of a failed copy: one primary error plus the errors it superseded
///
/// Suppressed errors keep the order in which they were observed.
#[derive(Debug)]
pub struct OutcomeError {
    primary: Error,
    suppressed: Vec<Error>,
}

impl OutcomeError {
    /// Create an outcome with no suppressed errors
    pub fn new(primary: impl Into<Error>) -> Self {
        Self {
            primary: primary.into(),
            suppressed: Vec::new(),
        }
    }

    /// Attach an error that occurred but was superseded by the primary
    pub fn suppress(&mut self, error: impl Into<Error>) {
        self.suppressed.push(error.into());
    }

    /// Builder form of [`OutcomeError::suppress`]
    pub fn with_suppressed(mut self, error: impl Into<Error>) -> Self {
        self.suppress(error);
        self
    }

    /// The error reported to the caller
    pub fn primary(&self) -> &Error {
        &self.primary
    }

    /// Errors superseded by the primary, in observed order
    pub fn suppressed(&self) -> &[Error] {
        &self.suppressed
    }

    /// Kind of the primary error
    pub fn kind(&self) -> FailureKind {
        self.primary.kind()
    }

    /// Message of the primary error
    pub fn message(&self) -> String {
        self.primary.message()
    }

    /// Split into the primary and suppressed errors
    pub fn into_parts(self) -> (Error, Vec<Error>) {
        (self.primary, self.suppressed)
    }
}

impl From<Error> for OutcomeError {
    fn from(primary: Error) -> Self {
        Self::new(primary)
    }
}

impl From<super::AcquisitionError> for OutcomeError {
    fn from(err: super::AcquisitionError) -> Self {
        Self::new(err)
    }
}

impl fmt::Display for OutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary)?;
        for (i, e) in self.suppressed.iter().enumerate() {
            write!(f, "\n  suppressed {}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl StdError for OutcomeError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.primary)
    }
}
