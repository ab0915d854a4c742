//! Result Set Copier Core Library
//!
//! Copies the results of a query into a file while guaranteeing that both
//! the data-source connection and the file writer are released, whatever
//! fails along the way. The caller always sees a single [`OutcomeError`]
//! describing the primary failure and the failures it superseded.

pub mod acquirer;
pub mod config;
pub mod error;
pub mod file_acquirer;
pub mod file_io;
pub mod orchestrator;
pub mod resource;

// Re-export main types
pub use acquirer::ResourceAcquirer;
pub use config::{ConfigError, ConfigLoader, CopierConfig};
pub use error::{
    AcquisitionError, Error, ErrorCategory, FailureKind, OperationError, OutcomeError,
    ReleaseError,
};
pub use file_acquirer::{FileAcquirer, RowSource};
pub use file_io::FileWriter;
pub use orchestrator::{CopyOrchestrator, CopyStage, ReleasePolicy};
pub use resource::{Resource, ResourceRole};
