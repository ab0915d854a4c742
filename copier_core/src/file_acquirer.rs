//! Acquirer that writes copy output to files on disk

use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::acquirer::ResourceAcquirer;
use crate::config::{CopierConfig, DEFAULT_BUFFER_CAPACITY};
use crate::error::{AcquisitionError, OperationError};
use crate::file_io::FileWriter;
use crate::resource::Resource;

/// Data source side of a file copy
///
/// Implementations own connection handling and row formatting; output is
/// streamed into whatever writer the acquirer opened.
pub trait RowSource {
    type Connection: Resource;

    /// Open a connection to the data source
    fn connect(&self) -> Result<Option<Self::Connection>, AcquisitionError>;

    /// Run `query` and write its rows to `out`
    fn copy_rows(
        &self,
        connection: Option<&mut Self::Connection>,
        query: &str,
        out: &mut dyn Write,
    ) -> Result<(), OperationError>;
}

/// [`ResourceAcquirer`] pairing a [`RowSource`] with [`FileWriter`]s
///
/// Relative file names are resolved against the output directory.
pub struct FileAcquirer<S> {
    source: S,
    output_dir: PathBuf,
    buffer_capacity: usize,
    sync_on_close: bool,
}

impl<S: RowSource> FileAcquirer<S> {
    /// Create an acquirer writing into `output_dir`
    pub fn new(source: S, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            output_dir: output_dir.into(),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            sync_on_close: true,
        }
    }

    /// Create an acquirer from configuration
    pub fn from_config(source: S, config: &CopierConfig) -> Self {
        Self {
            source,
            output_dir: config.output_dir.clone(),
            buffer_capacity: config.buffer_capacity,
            sync_on_close: config.sync_on_close,
        }
    }

    /// Directory output files are created in
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Full path a file name resolves to
    pub fn resolve(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

impl<S: RowSource> ResourceAcquirer for FileAcquirer<S> {
    type Connection = S::Connection;
    type Writer = FileWriter;

    fn acquire_connection(&self) -> Result<Option<Self::Connection>, AcquisitionError> {
        self.source.connect()
    }

    fn acquire_writer(&self, file_name: &str) -> Result<Option<Self::Writer>, AcquisitionError> {
        let path = self.resolve(file_name);
        FileWriter::with_options(&path, self.buffer_capacity, self.sync_on_close).map(Some)
    }

    fn copy_rows(
        &self,
        connection: Option<&mut Self::Connection>,
        query: &str,
        writer: Option<&mut Self::Writer>,
    ) -> Result<(), OperationError> {
        match writer {
            Some(writer) => self.source.copy_rows(connection, query, writer),
            None => {
                debug!("No writer available, discarding rows for query");
                self.source.copy_rows(connection, query, &mut std::io::sink())
            }
        }
    }
}
