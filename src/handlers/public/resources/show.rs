// handlers/public/resources/show.rs - GET /resources/:id handler

use axum::extract::{Path, State};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::handlers::layout::LayoutData;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Resource;

#[derive(Debug, Serialize)]
pub struct ShowPageData {
    #[serde(flatten)]
    pub layout: LayoutData,
    pub resource: Resource,
}

/// GET /resources/:id - a single resource with its type expanded
///
/// Any failure to fetch is reported as not found.
pub async fn show(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> ApiResult<ShowPageData> {
    let layout = LayoutData::load(&state, &jar).await;

    let resource = state.backend.get_resource(&id).await.map_err(|e| {
        tracing::error!(%id, "Error loading resource: {}", e);
        ApiError::not_found("Resource not found")
    })?;

    Ok(ApiResponse::success(ShowPageData { layout, resource }))
}
