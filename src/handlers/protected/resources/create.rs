// handlers/protected/resources/create.rs - POST /resources handler

use axum::{extract::State, Extension, Form};
use validator::Validate;

use super::{action_error, ActionResult};
use crate::app::AppState;
use crate::error::ApiError;
use crate::forms::{self, ResourceForm, FORM_INVALID};
use crate::middleware::{ApiResponse, ApiResult};
use crate::session::SessionToken;

/// POST /resources - validate the form and create a resource
///
/// Tags are normalized before submission. An `id` field in the form is
/// ignored; the backend assigns identifiers.
pub async fn create(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Form(form): Form<ResourceForm>,
) -> ApiResult<ActionResult> {
    if let Err(errors) = form.validate() {
        return Err(ApiError::validation_error(FORM_INVALID, Some(forms::field_errors(&errors))));
    }

    let resource = state
        .backend
        .create_resource(token.as_str(), &form.into_payload())
        .await
        .map_err(|e| action_error(e, "Failed to create resource"))?;

    tracing::info!(id = %resource.id, "resource created");

    Ok(ApiResponse::created(ActionResult {
        message: "Resource created successfully!".to_string(),
        resource,
    }))
}
