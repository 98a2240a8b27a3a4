//! Carts service errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    /// The cart item, or the product being added, does not exist.
    #[error("not found")]
    NotFound,

    #[error("cart item already exists")]
    AlreadyExists,

    /// A constraint rejected the row, or the quantity would overflow.
    #[error("invalid data")]
    InvalidData,

    #[error("invalid quantity value")]
    InvalidQuantity(#[from] TryFromIntError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if is_numeric_overflow(&error) {
            return Self::InvalidData;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::NotFound,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

/// `numeric_value_out_of_range`, raised when a quantity passes `i32::MAX`.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

fn is_numeric_overflow(error: &Error) -> bool {
    error
        .as_database_error()
        .and_then(DatabaseError::code)
        .is_some_and(|code| code == NUMERIC_VALUE_OUT_OF_RANGE)
}
