//! Scope guard that owns one copy resource until it is released

use log::{debug, warn};

use crate::error::ReleaseError;
use crate::resource::{Resource, ResourceRole};

/// Holds a possibly absent resource and closes it at most once
///
/// If the guard is dropped without an explicit [`Scoped::release`] (the copy
/// panicked), the resource is closed on drop and any close failure is logged.
pub(crate) struct Scoped<R: Resource> {
    role: ResourceRole,
    resource: Option<R>,
}

impl<R: Resource> Scoped<R> {
    pub(crate) fn new(role: ResourceRole, resource: Option<R>) -> Self {
        if resource.is_none() {
            debug!("Acquired absent {role}, it will not be closed");
        }
        Self { role, resource }
    }

    pub(crate) fn get_mut(&mut self) -> Option<&mut R> {
        self.resource.as_mut()
    }

    /// Close the resource now; absent or already released resources are skipped
    pub(crate) fn release(&mut self) -> Result<(), ReleaseError> {
        match self.resource.take() {
            Some(mut resource) => {
                debug!("Releasing {}", self.role);
                resource.close()
            }
            None => Ok(()),
        }
    }
}

impl<R: Resource> Drop for Scoped<R> {
    fn drop(&mut self) {
        if let Some(mut resource) = self.resource.take() {
            debug!("Releasing {} during unwind", self.role);
            if let Err(err) = resource.close() {
                warn!("Close failure while unwinding: {err}");
            }
        }
    }
}
