use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::client::{CatalogBackend, ClientError, PbClient};
use crate::config::{AppConfig, SecurityConfig};
use crate::handlers;
use crate::middleware::session_gate_middleware;

/// Shared per-process state. Immutable; handlers never write to it.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn CatalogBackend>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// State talking to the backend named in `config`
    pub fn new(config: AppConfig) -> Result<Self, ClientError> {
        let client = PbClient::new(&config.backend)?;
        Ok(Self::with_backend(config, Arc::new(client)))
    }

    pub fn with_backend(config: AppConfig, backend: Arc<dyn CatalogBackend>) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .merge(public_routes())
        .merge(protected_routes())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn public_routes() -> Router<AppState> {
    use handlers::public::{auth, resources};

    Router::new()
        // Catalog pages
        .route("/", get(resources::list))
        .route("/resources/:id", get(resources::show))
        // Session management
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

fn protected_routes() -> Router<AppState> {
    use handlers::protected::resources;

    Router::new()
        .route("/resources", post(resources::create))
        .route("/resources/delete", post(resources::delete_by_form))
        .route("/resources/:id/edit", post(resources::update))
        .route("/resources/:id/delete", post(resources::delete))
        .route_layer(middleware::from_fn(session_gate_middleware))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            // Wildcards cannot be combined with credentialed requests
            Ok(_) if origin == "*" => {
                tracing::warn!("Ignoring wildcard CORS origin");
                None
            }
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
