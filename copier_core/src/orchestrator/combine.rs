//! Primary/suppressed combination of the errors seen after acquisition

use crate::error::{Error, OutcomeError, ReleaseError};

/// Fold the copy result and the release failures into one outcome
///
/// `release_errors` must be in the order the closes happened. A copy failure
/// is always primary. Otherwise the last release failure is primary and the
/// earlier ones are suppressed on it.
pub(crate) fn combine_outcome(
    operation: Option<Error>,
    mut release_errors: Vec<ReleaseError>,
) -> Result<(), OutcomeError> {
    let primary = match operation {
        Some(error) => error,
        None => match release_errors.pop() {
            Some(last) => Error::from(last),
            None => return Ok(()),
        },
    };

    let mut outcome = OutcomeError::new(primary);
    for error in release_errors {
        outcome.suppress(error);
    }
    Err(outcome)
}
