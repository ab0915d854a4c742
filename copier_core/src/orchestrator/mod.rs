//! Copy orchestration
//!
//! [`CopyOrchestrator`] sequences a copy: acquire the connection, acquire the
//! writer, copy rows, then release both resources exactly once. How release
//! failures are reported depends on the [`ReleasePolicy`]:
//!
//! - [`ReleasePolicy::Scoped`] closes the writer and then the connection.
//!   A copy failure is primary; otherwise the last close failure is primary.
//!   Every other failure is suppressed onto the primary.
//! - [`ReleasePolicy::Manual`] closes the connection and then the writer in a
//!   cleanup block that discards close failures. Only a copy or acquisition
//!   failure is ever reported.
//!
//! In both policies an acquisition failure ends the copy immediately, and an
//! absent resource is never closed.

mod combine;
mod manual;
mod scope;
mod scoped;

use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::acquirer::ResourceAcquirer;
use crate::config::CopierConfig;
use crate::error::{AcquisitionError, OutcomeError};

/// How resources are released once the copy has run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleasePolicy {
    /// Reverse acquisition order, every failure kept
    #[default]
    Scoped,
    /// Acquisition order, close failures discarded
    Manual,
}

impl fmt::Display for ReleasePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scoped => f.write_str("scoped"),
            Self::Manual => f.write_str("manual"),
        }
    }
}

/// Stages a copy moves through
///
/// A failed connection acquisition jumps straight to [`CopyStage::Done`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStage {
    /// Nothing acquired yet
    Init,
    /// The connection was handed out, possibly absent
    ConnectionAcquired,
    /// The writer was handed out, possibly absent
    WriterAcquired,
    /// The row copy returned, successfully or not
    Copied,
    /// The connection was closed, or there was none to close
    ConnectionReleased,
    /// The writer was closed, or there was none to close
    WriterReleased,
    /// The outcome is final
    Done,
}

impl fmt::Display for CopyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "INIT",
            Self::ConnectionAcquired => "CONNECTION_ACQUIRED",
            Self::WriterAcquired => "WRITER_ACQUIRED",
            Self::Copied => "COPIED",
            Self::ConnectionReleased => "CONNECTION_RELEASED",
            Self::WriterReleased => "WRITER_RELEASED",
            Self::Done => "DONE",
        };
        f.write_str(name)
    }
}

fn enter(stage: CopyStage) {
    trace!("Copy stage: {stage}");
}

/// Copies query results into a file through a [`ResourceAcquirer`]
pub struct CopyOrchestrator<A> {
    acquirer: A,
    policy: ReleasePolicy,
}

impl<A: ResourceAcquirer> CopyOrchestrator<A> {
    /// Create an orchestrator with an explicit release policy
    pub fn new(acquirer: A, policy: ReleasePolicy) -> Self {
        Self { acquirer, policy }
    }

    /// Create an orchestrator using [`ReleasePolicy::Scoped`]
    pub fn scoped(acquirer: A) -> Self {
        Self::new(acquirer, ReleasePolicy::Scoped)
    }

    /// Create an orchestrator using [`ReleasePolicy::Manual`]
    pub fn manual(acquirer: A) -> Self {
        Self::new(acquirer, ReleasePolicy::Manual)
    }

    /// Create an orchestrator with the policy from `config`
    pub fn from_config(acquirer: A, config: &CopierConfig) -> Self {
        Self::new(acquirer, config.policy)
    }

    /// The release policy in use
    pub fn policy(&self) -> ReleasePolicy {
        self.policy
    }

    /// The underlying acquirer
    pub fn acquirer(&self) -> &A {
        &self.acquirer
    }

    /// Copy the results of `query` into `file_name`
    ///
    /// Returns at most one [`OutcomeError`]. Under the scoped policy it
    /// carries every failure observed after acquisition; under the manual
    /// policy close failures are dropped.
    pub fn copy_result_set_to_file(
        &self,
        query: &str,
        file_name: &str,
    ) -> Result<(), OutcomeError> {
        debug!("Copying result set into '{file_name}' with {} release", self.policy);
        let result = match self.policy {
            ReleasePolicy::Scoped => scoped::copy(&self.acquirer, query, file_name),
            ReleasePolicy::Manual => manual::copy(&self.acquirer, query, file_name),
        };
        if let Err(outcome) = &result {
            debug!(
                "Copy into '{file_name}' failed with {} ({} suppressed)",
                outcome.kind(),
                outcome.suppressed().len()
            );
        }
        result
    }

    /// Open a connection for probing the data source; the caller closes it
    pub fn test_connection(&self) -> Result<Option<A::Connection>, AcquisitionError> {
        self.acquirer.test_connection()
    }
}
