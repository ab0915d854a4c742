//! Manual release: a cleanup block closes the connection and then the
//! writer, discarding any close failure

use log::debug;

use super::{CopyStage, enter};
use crate::acquirer::ResourceAcquirer;
use crate::error::{Error, OutcomeError};
use crate::resource::{Resource, ResourceRole};

pub(super) fn copy<A: ResourceAcquirer>(
    acquirer: &A,
    query: &str,
    file_name: &str,
) -> Result<(), OutcomeError> {
    enter(CopyStage::Init);
    let connection = acquirer
        .acquire_connection()
        .inspect_err(|err| {
            debug!("Connection acquisition failed: {err}");
            enter(CopyStage::Done);
        })?;
    enter(CopyStage::ConnectionAcquired);

    let mut cleanup = Cleanup {
        connection,
        writer: None,
    };
    let result = match acquirer.acquire_writer(file_name) {
        Ok(acquired) => {
            cleanup.writer = acquired;
            enter(CopyStage::WriterAcquired);
            let copied = acquirer
                .copy_rows(cleanup.connection.as_mut(), query, cleanup.writer.as_mut())
                .map_err(Error::from);
            enter(CopyStage::Copied);
            copied
        }
        Err(err) => Err(Error::from(err)),
    };

    cleanup.release();
    enter(CopyStage::Done);
    result.map_err(OutcomeError::new)
}

/// Both handles of a manual copy, closed connection first
///
/// Dropping the guard runs the same cleanup, so a panic in the copy still
/// releases whatever was acquired.
struct Cleanup<C: Resource, W: Resource> {
    connection: Option<C>,
    writer: Option<W>,
}

impl<C: Resource, W: Resource> Cleanup<C, W> {
    /// Idempotent: each handle is taken before it is closed
    fn release(&mut self) {
        close_quietly(ResourceRole::Connection, self.connection.take());
        enter(CopyStage::ConnectionReleased);
        close_quietly(ResourceRole::Writer, self.writer.take());
        enter(CopyStage::WriterReleased);
    }
}

impl<C: Resource, W: Resource> Drop for Cleanup<C, W> {
    fn drop(&mut self) {
        if self.connection.is_some() || self.writer.is_some() {
            debug!("Releasing manual copy handles while unwinding");
            self.release();
        }
    }
}

fn close_quietly<R: Resource>(role: ResourceRole, resource: Option<R>) {
    let Some(mut resource) = resource else {
        return;
    };
    debug!("Releasing {role}");
    if let Err(err) = resource.close() {
        debug!("Discarding {role} close failure: {err}");
    }
}
