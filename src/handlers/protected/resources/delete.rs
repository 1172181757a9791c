// handlers/protected/resources/delete.rs - resource deletion handlers

use axum::{
    extract::{Path, State},
    response::Redirect,
    Extension, Form,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::session::{self, SessionToken};

const DELETE_FAILED: &str = "Could not delete resource";

#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub id: String,
}

/// POST /resources/delete - delete the resource named by the form's `id`
/// and stay on the listing
pub async fn delete_by_form(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Form(form): Form<DeleteForm>,
) -> ApiResult<Value> {
    let id = form.id.trim();
    if id.is_empty() {
        return Err(ApiError::bad_request("Missing resource ID"));
    }

    remove(&state, &token, id).await?;
    Ok(ApiResponse::success(json!({ "deleted": id })))
}

/// POST /resources/:id/delete - delete from the detail page, then go home
pub async fn delete(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    remove(&state, &token, &id).await?;
    Ok(Redirect::to(session::HOME_PATH))
}

async fn remove(state: &AppState, token: &SessionToken, id: &str) -> Result<(), ApiError> {
    state
        .backend
        .delete_resource(token.as_str(), id)
        .await
        .map_err(|e| {
            tracing::error!(%id, "Delete failed: {}", e);
            ApiError::internal_server_error(DELETE_FAILED)
        })?;

    tracing::info!(%id, "resource deleted");
    Ok(())
}
