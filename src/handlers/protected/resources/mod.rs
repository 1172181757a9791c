// handlers/protected/resources/mod.rs - Resource mutations

use serde::Serialize;

use crate::client::ClientError;
use crate::error::ApiError;
use crate::models::Resource;

pub mod create;
pub mod delete;
pub mod update;

pub use create::create;
pub use delete::{delete, delete_by_form};
pub use update::update;

#[derive(Debug, Serialize)]
pub struct ActionResult {
    pub message: String,
    pub resource: Resource,
}

/// Backend field errors go back onto the form; everything else is reported
/// with the action's generic failure message.
pub(crate) fn action_error(err: ClientError, fallback: &str) -> ApiError {
    match err {
        ClientError::Api(failure) if failure.has_field_errors() => {
            ApiError::validation_error(failure.message, Some(failure.field_errors))
        }
        other => {
            tracing::error!("{}: {}", fallback, other);
            ApiError::internal_server_error(fallback)
        }
    }
}
