// handlers/public/resources/list.rs - GET / handler

use axum::extract::{Query, State};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::ApiError;
use crate::filter::{Filter, DEFAULT_SORT};
use crate::handlers::layout::LayoutData;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{ListPage, Resource};

/// Raw query parameters. Kept as strings so a malformed `page` falls back
/// to page 1 instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub type_filter: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListPageData {
    #[serde(flatten)]
    pub layout: LayoutData,
    pub resources: ListPage<Resource>,
    pub search: String,
    #[serde(rename = "type")]
    pub type_filter: String,
    pub sort: String,
}

/// GET / - paginated, searchable, filterable resource listing
pub async fn list(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ListQuery>,
) -> ApiResult<ListPageData> {
    let layout = LayoutData::load(&state, &jar).await;

    let page = parse_page(query.page.as_deref());
    let search = query.search.unwrap_or_default();
    let type_filter = query.type_filter.unwrap_or_default();
    let sort = query
        .sort
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SORT.to_string());

    let filter = Filter::resources(page, &search, &type_filter, &sort)?;
    let resources = state.backend.list_resources(&filter).await.map_err(|e| {
        tracing::error!("Error loading resources: {}", e);
        ApiError::from(e)
    })?;

    Ok(ApiResponse::success(ListPageData {
        layout,
        resources,
        search,
        type_filter,
        sort,
    }))
}

fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::parse_page;

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-3")), 1);
        assert_eq!(parse_page(Some("4")), 4);
    }
}
