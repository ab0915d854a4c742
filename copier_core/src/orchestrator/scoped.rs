//! Scoped release: resources are closed in reverse acquisition order and
//! every failure is kept on the reported outcome

use log::debug;

use super::combine::combine_outcome;
use super::scope::Scoped;
use super::{CopyStage, enter};
use crate::acquirer::ResourceAcquirer;
use crate::error::{Error, OutcomeError};
use crate::resource::ResourceRole;

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
    let mut connection = Scoped::new(ResourceRole::Connection, connection);
    enter(CopyStage::ConnectionAcquired);

    let mut writer = match acquirer.acquire_writer(file_name) {
        Ok(writer) => Scoped::new(ResourceRole::Writer, writer),
        Err(err) => {
            debug!("Writer acquisition failed: {err}");
            let mut outcome = OutcomeError::new(err);
            if let Err(close) = connection.release() {
                outcome.suppress(close);
            }
            enter(CopyStage::Done);
            return Err(outcome);
        }
    };
    enter(CopyStage::WriterAcquired);

    let copied = acquirer.copy_rows(connection.get_mut(), query, writer.get_mut());
    enter(CopyStage::Copied);

    let mut release_errors = Vec::new();
    if let Err(err) = writer.release() {
        release_errors.push(err);
    }
    enter(CopyStage::WriterReleased);
    if let Err(err) = connection.release() {
        release_errors.push(err);
    }
    enter(CopyStage::ConnectionReleased);

    enter(CopyStage::Done);
    combine_outcome(copied.err().map(Error::from), release_errors)
}
