//! Validation error rendering.

use salvo::http::StatusError;
use validator::ValidationErrors;

/// 400 naming every field that failed validation, sorted.
pub(crate) fn bad_request(subject: &str, errors: &ValidationErrors) -> StatusError {
    let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();

    fields.sort_unstable();

    StatusError::bad_request().brief(format!("Invalid {subject}: {}", fields.join(", ")))
}
