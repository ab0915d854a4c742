//! Builder for failure scenarios across a whole copy

use crate::mocks::{MockAcquirer, ResourceBehavior};

/// Message used for connection acquisition failures
pub const CONNECTION_OPEN_FAILURE: &str = "Exception while creating new connection";
/// Message used for writer acquisition failures
pub const WRITER_OPEN_FAILURE: &str = "Exception while opening writer";
/// Message used for copy failures
pub const COPY_FAILURE: &str = "Exception in copyResultSetToFile";
/// Message the copy panics with
pub const COPY_PANIC: &str = "Panic in copyResultSetToFile";
/// Message used for connection close failures
pub const CONNECTION_CLOSE_FAILURE: &str = "Exception while closing connection";
/// Message used for writer close failures
pub const WRITER_CLOSE_FAILURE: &str = "Exception while closing writer";

/// Fluent description of which steps of a copy fail
///
/// Steps left unconfigured succeed. Failures use the message constants in
/// this module so tests can assert on them.
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    connection: ResourceBehavior,
    writer: ResourceBehavior,
    copy_failure: Option<String>,
    copy_panics: bool,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    /// Scenario where every step succeeds
    pub fn new() -> Self {
        Self {
            connection: ResourceBehavior::Present,
            writer: ResourceBehavior::Present,
            copy_failure: None,
            copy_panics: false,
        }
    }

    /// Connection acquisition fails
    pub fn connection_fails(mut self) -> Self {
        self.connection = ResourceBehavior::FailsOnAcquire(CONNECTION_OPEN_FAILURE.to_string());
        self
    }

    /// Connection acquisition yields nothing
    pub fn connection_absent(mut self) -> Self {
        self.connection = ResourceBehavior::Absent;
        self
    }

    /// Closing the connection fails
    pub fn connection_close_fails(mut self) -> Self {
        self.connection = ResourceBehavior::FailsOnClose(CONNECTION_CLOSE_FAILURE.to_string());
        self
    }

    /// Writer acquisition fails
    pub fn writer_fails(mut self) -> Self {
        self.writer = ResourceBehavior::FailsOnAcquire(WRITER_OPEN_FAILURE.to_string());
        self
    }

    /// Writer acquisition yields nothing
    pub fn writer_absent(mut self) -> Self {
        self.writer = ResourceBehavior::Absent;
        self
    }

    /// Closing the writer fails
    pub fn writer_close_fails(mut self) -> Self {
        self.writer = ResourceBehavior::FailsOnClose(WRITER_CLOSE_FAILURE.to_string());
        self
    }

    /// The copy itself fails
    pub fn copy_fails(mut self) -> Self {
        self.copy_failure = Some(COPY_FAILURE.to_string());
        self
    }

    /// The copy panics instead of returning
    pub fn copy_panics(mut self) -> Self {
        self.copy_panics = true;
        self
    }

    /// Build the configured mock
    pub fn build(self) -> MockAcquirer {
        let mut mock = MockAcquirer::new();
        mock.set_connection(self.connection);
        mock.set_writer(self.writer);
        if let Some(message) = self.copy_failure {
            mock.expect_copy_failure(&message);
        }
        if self.copy_panics {
            mock.expect_copy_panic(COPY_PANIC);
        }
        mock
    }
}
