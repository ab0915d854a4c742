//! Buffered file writer used as the copy destination

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::DEFAULT_BUFFER_CAPACITY;
use crate::error::{AcquisitionError, ReleaseError};
use crate::resource::{Resource, ResourceRole};

/// A file opened for writing copy output
///
/// Closing flushes the buffer and, when enabled, syncs the file to disk.
/// Once closed, further writes fail and further closes are no-ops.
#[derive(Debug)]
pub struct FileWriter {
    path: PathBuf,
    inner: Option<BufWriter<File>>,
    sync_on_close: bool,
}

impl FileWriter {
    /// Create (or truncate) the file at `path`
    pub fn create(path: impl AsRef<Path>) -> Result<Self, AcquisitionError> {
        Self::with_options(path, DEFAULT_BUFFER_CAPACITY, true)
    }

    /// Create the file with an explicit buffer size and sync behaviour
    pub fn with_options(
        path: impl AsRef<Path>,
        buffer_capacity: usize,
        sync_on_close: bool,
    ) -> Result<Self, AcquisitionError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| AcquisitionError::writer_io(path, e))?;
        debug!("Opened writer for {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            inner: Some(BufWriter::with_capacity(buffer_capacity, file)),
            sync_on_close,
        })
    }

    /// Path of the destination file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether [`Resource::close`] has already run
    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    fn open_inner(&mut self) -> io::Result<&mut BufWriter<File>> {
        let path = &self.path;
        self.inner
            .as_mut()
            .ok_or_else(|| io::Error::other(format!("writer for {} is closed", path.display())))
    }
}

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.open_inner()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.open_inner()?.flush()
    }
}

impl Resource for FileWriter {
    fn close(&mut self) -> Result<(), ReleaseError> {
        let Some(writer) = self.inner.take() else {
            return Ok(());
        };

        let file = writer
            .into_inner()
            .map_err(|e| ReleaseError::from_io(ResourceRole::Writer, e.into_error()))?;
        if self.sync_on_close {
            file.sync_all()
                .map_err(|e| ReleaseError::from_io(ResourceRole::Writer, e))?;
        }
        debug!("Closed writer for {}", self.path.display());
        Ok(())
    }
}
