//! Mock implementation of ResourceAcquirer for testing

use super::resource::{Interaction, InteractionLog, MockResource};
use copier_core::{AcquisitionError, OperationError, ResourceAcquirer, ResourceRole};
use std::sync::{Arc, Mutex};

/// Mock acquirer with configurable failures at every step
///
/// Every call, including closes on the resources it hands out, is recorded
/// in a shared [`InteractionLog`].
///
/// # Examples
///
/// ```rust
/// use copier_core::CopyOrchestrator;
/// use copier_test_utils::MockAcquirer;
///
/// let mut mock = MockAcquirer::new();
/// mock.expect_connection_close_failure("Exception while closing connection");
/// let log = mock.log();
///
/// let orchestrator = CopyOrchestrator::scoped(mock);
/// let outcome = orchestrator
///     .copy_result_set_to_file("select 1 from account", "account.csv")
///     .unwrap_err();
///
/// assert_eq!(outcome.message(), "Exception while closing connection");
/// assert_eq!(log.closes().len(), 2);
/// ```
pub struct MockAcquirer {
    behavior: Arc<Mutex<MockBehavior>>,
    log: InteractionLog,
}

/// What a single resource does when acquired and closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceBehavior {
    /// Acquired, closes cleanly
    Present,
    /// Acquired, close fails with the message
    FailsOnClose(String),
    /// Acquisition yields no resource
    Absent,
    /// Acquisition fails with the message
    FailsOnAcquire(String),
}

#[derive(Debug, Clone)]
struct MockBehavior {
    connection: ResourceBehavior,
    writer: ResourceBehavior,
    copy_failure: Option<String>,
    copy_panic: Option<String>,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            connection: ResourceBehavior::Present,
            writer: ResourceBehavior::Present,
            copy_failure: None,
            copy_panic: None,
        }
    }
}

impl Default for MockAcquirer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAcquirer {
    /// Create a mock where everything succeeds
    pub fn new() -> Self {
        Self {
            behavior: Arc::new(Mutex::new(MockBehavior::default())),
            log: InteractionLog::new(),
        }
    }

    /// Handle to the interaction log shared with handed-out resources
    pub fn log(&self) -> InteractionLog {
        self.log.clone()
    }

    /// Set the connection behaviour
    pub fn set_connection(&mut self, behavior: ResourceBehavior) {
        self.behavior.lock().unwrap().connection = behavior;
    }

    /// Set the writer behaviour
    pub fn set_writer(&mut self, behavior: ResourceBehavior) {
        self.behavior.lock().unwrap().writer = behavior;
    }

    /// Configure connection acquisition to fail
    pub fn expect_connection_failure(&mut self, message: &str) {
        self.set_connection(ResourceBehavior::FailsOnAcquire(message.to_string()));
    }

    /// Configure connection acquisition to yield nothing
    pub fn expect_absent_connection(&mut self) {
        self.set_connection(ResourceBehavior::Absent);
    }

    /// Configure closing the connection to fail
    pub fn expect_connection_close_failure(&mut self, message: &str) {
        self.set_connection(ResourceBehavior::FailsOnClose(message.to_string()));
    }

    /// Configure writer acquisition to fail
    pub fn expect_writer_failure(&mut self, message: &str) {
        self.set_writer(ResourceBehavior::FailsOnAcquire(message.to_string()));
    }

    /// Configure writer acquisition to yield nothing
    pub fn expect_absent_writer(&mut self) {
        self.set_writer(ResourceBehavior::Absent);
    }

    /// Configure closing the writer to fail
    pub fn expect_writer_close_failure(&mut self, message: &str) {
        self.set_writer(ResourceBehavior::FailsOnClose(message.to_string()));
    }

    /// Configure the copy itself to fail
    pub fn expect_copy_failure(&mut self, message: &str) {
        self.behavior.lock().unwrap().copy_failure = Some(message.to_string());
    }

    /// Configure the copy to panic with the message
    pub fn expect_copy_panic(&mut self, message: &str) {
        self.behavior.lock().unwrap().copy_panic = Some(message.to_string());
    }

    fn hand_out(
        &self,
        role: ResourceRole,
        behavior: ResourceBehavior,
        fail: impl FnOnce(String) -> AcquisitionError,
    ) -> Result<Option<MockResource>, AcquisitionError> {
        match behavior {
            ResourceBehavior::Present => Ok(Some(MockResource::new(role, self.log.clone()))),
            ResourceBehavior::FailsOnClose(message) => Ok(Some(MockResource::failing(
                role,
                self.log.clone(),
                &message,
            ))),
            ResourceBehavior::Absent => Ok(None),
            ResourceBehavior::FailsOnAcquire(message) => Err(fail(message)),
        }
    }
}

impl ResourceAcquirer for MockAcquirer {
    type Connection = MockResource;
    type Writer = MockResource;

    fn acquire_connection(&self) -> Result<Option<MockResource>, AcquisitionError> {
        self.log.record(Interaction::AcquireConnection);
        let behavior = self.behavior.lock().unwrap().connection.clone();
        self.hand_out(ResourceRole::Connection, behavior, AcquisitionError::connection)
    }

    fn acquire_writer(&self, file_name: &str) -> Result<Option<MockResource>, AcquisitionError> {
        self.log.record(Interaction::AcquireWriter(file_name.to_string()));
        let behavior = self.behavior.lock().unwrap().writer.clone();
        self.hand_out(ResourceRole::Writer, behavior, |message| {
            AcquisitionError::writer(file_name, message)
        })
    }

    fn copy_rows(
        &self,
        connection: Option<&mut MockResource>,
        query: &str,
        writer: Option<&mut MockResource>,
    ) -> Result<(), OperationError> {
        self.log.record(Interaction::CopyRows {
            query: query.to_string(),
            connection_present: connection.is_some(),
            writer_present: writer.is_some(),
        });
        // Lock released before panicking so the mutex is not poisoned
        let (failure, panic_message) = {
            let behavior = self.behavior.lock().unwrap();
            (behavior.copy_failure.clone(), behavior.copy_panic.clone())
        };
        if let Some(message) = panic_message {
            panic!("{message}");
        }
        match failure {
            Some(message) => Err(OperationError::copy(message)),
            None => Ok(()),
        }
    }
}
