//! Row source producing fixed output, for file-backed copies

use super::resource::{Interaction, InteractionLog, MockResource};
use copier_core::{AcquisitionError, OperationError, ResourceRole, RowSource};
use std::io::Write;

/// Row source that writes a fixed set of lines
///
/// Connections are [`MockResource`]s reporting into the source's log. A
/// failure can be injected after a given number of lines has been written.
#[derive(Debug, Clone, Default)]
pub struct StaticRows {
    lines: Vec<String>,
    fail_after: Option<(usize, String)>,
    connection_close_failure: Option<String>,
    log: InteractionLog,
}

impl StaticRows {
    /// Source writing `lines`, each followed by a newline
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Fail with `message` once `count` lines have been written
    pub fn fail_after(mut self, count: usize, message: &str) -> Self {
        self.fail_after = Some((count, message.to_string()));
        self
    }

    /// Make closing the connection fail with `message`
    pub fn with_connection_close_failure(mut self, message: &str) -> Self {
        self.connection_close_failure = Some(message.to_string());
        self
    }

    /// Handle to the interaction log
    pub fn log(&self) -> InteractionLog {
        self.log.clone()
    }
}

impl RowSource for StaticRows {
    type Connection = MockResource;

    fn connect(&self) -> Result<Option<MockResource>, AcquisitionError> {
        self.log.record(Interaction::AcquireConnection);
        let connection = match &self.connection_close_failure {
            Some(message) => {
                MockResource::failing(ResourceRole::Connection, self.log.clone(), message)
            }
            None => MockResource::new(ResourceRole::Connection, self.log.clone()),
        };
        Ok(Some(connection))
    }

    fn copy_rows(
        &self,
        connection: Option<&mut MockResource>,
        query: &str,
        out: &mut dyn Write,
    ) -> Result<(), OperationError> {
        self.log.record(Interaction::CopyRows {
            query: query.to_string(),
            connection_present: connection.is_some(),
            writer_present: true,
        });

        for (written, line) in self.lines.iter().enumerate() {
            self.check_failure(written)?;
            writeln!(out, "{line}")?;
        }
        self.check_failure(self.lines.len())
    }
}

impl StaticRows {
    fn check_failure(&self, written: usize) -> Result<(), OperationError> {
        match &self.fail_after {
            Some((count, message)) if *count == written => {
                Err(OperationError::copy(message.clone()))
            }
            _ => Ok(()),
        }
    }
}
