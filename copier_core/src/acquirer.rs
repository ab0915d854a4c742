//! Collaborator contract for obtaining resources and copying rows
//!
//! The orchestrator treats every method here as an opaque fallible call.
//! Either acquisition may hand back an absent resource (`Ok(None)`); absent
//! resources are passed to [`ResourceAcquirer::copy_rows`] as `None` and are
//! never closed.

use crate::error::{AcquisitionError, OperationError};
use crate::resource::Resource;

/// Provides the connection and writer for a copy and performs the copy itself
pub trait ResourceAcquirer {
    /// Data-source connection handle
    type Connection: Resource;
    /// Destination writer handle
    type Writer: Resource;

    /// Open a connection to the data source
    fn acquire_connection(&self) -> Result<Option<Self::Connection>, AcquisitionError>;

    /// Open a writer for `file_name`
    fn acquire_writer(&self, file_name: &str) -> Result<Option<Self::Writer>, AcquisitionError>;

    /// Copy the rows produced by `query` from `connection` into `writer`
    fn copy_rows(
        &self,
        connection: Option<&mut Self::Connection>,
        query: &str,
        writer: Option<&mut Self::Writer>,
    ) -> Result<(), OperationError>;

    /// Hand out a fresh connection for probing the data source
    ///
    /// The caller owns the returned connection and is responsible for
    /// closing it.
    fn test_connection(&self) -> Result<Option<Self::Connection>, AcquisitionError> {
        self.acquire_connection()
    }
}

impl<A: ResourceAcquirer + ?Sized> ResourceAcquirer for &A {
    type Connection = A::Connection;
    type Writer = A::Writer;

    fn acquire_connection(&self) -> Result<Option<Self::Connection>, AcquisitionError> {
        (**self).acquire_connection()
    }

    fn acquire_writer(&self, file_name: &str) -> Result<Option<Self::Writer>, AcquisitionError> {
        (**self).acquire_writer(file_name)
    }

    fn copy_rows(
        &self,
        connection: Option<&mut Self::Connection>,
        query: &str,
        writer: Option<&mut Self::Writer>,
    ) -> Result<(), OperationError> {
        (**self).copy_rows(connection, query, writer)
    }

    fn test_connection(&self) -> Result<Option<Self::Connection>, AcquisitionError> {
        (**self).test_connection()
    }
}
