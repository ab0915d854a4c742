//! Mock resources and the shared interaction log

use copier_core::{ReleaseError, Resource, ResourceRole};
use std::sync::{Arc, Mutex};

/// A call observed by the mocks, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    AcquireConnection,
    AcquireWriter(String),
    CopyRows {
        query: String,
        connection_present: bool,
        writer_present: bool,
    },
    Close(ResourceRole),
}

/// Shared, ordered record of every mock interaction
///
/// Clones share the same underlying log, so resources handed out by an
/// acquirer report into the acquirer's log.
#[derive(Debug, Clone, Default)]
pub struct InteractionLog {
    entries: Arc<Mutex<Vec<Interaction>>>,
}

impl InteractionLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interaction
    pub fn record(&self, interaction: Interaction) {
        self.entries.lock().unwrap().push(interaction);
    }

    /// Copy of every interaction so far
    pub fn snapshot(&self) -> Vec<Interaction> {
        self.entries.lock().unwrap().clone()
    }

    /// How many times `interaction` was recorded
    pub fn count(&self, interaction: &Interaction) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| *entry == interaction)
            .count()
    }

    /// Roles closed, in close order
    pub fn closes(&self) -> Vec<ResourceRole> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter_map(|entry| match entry {
                Interaction::Close(role) => Some(*role),
                _ => None,
            })
            .collect()
    }

    /// Whether rows were copied at least once
    pub fn copied(&self) -> bool {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .any(|entry| matches!(entry, Interaction::CopyRows { .. }))
    }
}

/// Resource that records its close and optionally fails it
#[derive(Debug)]
pub struct MockResource {
    role: ResourceRole,
    log: InteractionLog,
    close_failure: Option<String>,
}

impl MockResource {
    /// Resource that closes cleanly
    pub fn new(role: ResourceRole, log: InteractionLog) -> Self {
        Self {
            role,
            log,
            close_failure: None,
        }
    }

    /// Resource whose close fails with `message`
    pub fn failing(role: ResourceRole, log: InteractionLog, message: &str) -> Self {
        Self {
            role,
            log,
            close_failure: Some(message.to_string()),
        }
    }

    /// Role this resource plays
    pub fn role(&self) -> ResourceRole {
        self.role
    }
}

impl Resource for MockResource {
    fn close(&mut self) -> Result<(), ReleaseError> {
        self.log.record(Interaction::Close(self.role));
        match &self.close_failure {
            Some(message) => Err(ReleaseError::new(self.role, message.clone())),
            None => Ok(()),
        }
    }
}
