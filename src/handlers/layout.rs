// handlers/layout.rs - data shared by every top-level page

use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::app::AppState;
use crate::models::ResourceType;
use crate::session;

#[derive(Debug, Clone, Serialize)]
pub struct LayoutData {
    /// Options for the type dropdown and filter
    pub types: Vec<ResourceType>,
    /// Drives whether add/edit controls are shown
    pub logged_in: bool,
}

impl LayoutData {
    /// A failed type lookup degrades to an empty list instead of failing the page
    pub async fn load(state: &AppState, jar: &CookieJar) -> Self {
        let types = match state.backend.list_types().await {
            Ok(list) => list.items,
            Err(e) => {
                tracing::warn!("Error loading types: {}", e);
                vec![]
            }
        };

        Self {
            types,
            logged_in: session::is_logged_in(jar),
        }
    }
}
