//! Comment Errors

use salvo::http::StatusError;
use tracing::error;

use shopfront_app::domain::comments::CommentsServiceError;

use crate::validation;

pub(crate) fn into_status_error(error: CommentsServiceError) -> StatusError {
    match error {
        CommentsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        CommentsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Comment already exists")
        }
        CommentsServiceError::Validation(errors) => validation::bad_request("comment", &errors),
        CommentsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid comment payload")
        }
        CommentsServiceError::Sql(source) => {
            error!("comment storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
