// handlers/protected/resources/update.rs - POST /resources/:id/edit handler

use axum::{
    extract::{Path, State},
    Extension, Form,
};
use validator::Validate;

use super::{action_error, ActionResult};
use crate::app::AppState;
use crate::error::ApiError;
use crate::forms::{self, ResourceForm, FORM_INVALID};
use crate::middleware::{ApiResponse, ApiResult};
use crate::session::SessionToken;

/// POST /resources/:id/edit - replace every editable field of a resource
pub async fn update(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<String>,
    Form(form): Form<ResourceForm>,
) -> ApiResult<ActionResult> {
    if let Err(errors) = form.validate() {
        return Err(ApiError::validation_error(FORM_INVALID, Some(forms::field_errors(&errors))));
    }

    let resource = state
        .backend
        .update_resource(token.as_str(), &id, &form.into_payload())
        .await
        .map_err(|e| action_error(e, "Failed to update resource"))?;

    tracing::info!(%id, "resource updated");

    Ok(ApiResponse::success(ActionResult {
        message: "Resource updated successfully!".to_string(),
        resource,
    }))
}
