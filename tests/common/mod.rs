#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use resource_catalog::config::AppConfig;
use resource_catalog::{app, AppState};

/// Token the fake backend issues for password `secret`
pub const TOKEN: &str = "tok123";
pub const PASSWORD: &str = "secret";
pub const TAKEN_EMAIL: &str = "taken@example.com";

/// One request as seen by the fake backend
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

impl Recorded {
    pub fn query_params(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.query.as_deref().unwrap_or("").as_bytes())
            .into_owned()
            .collect()
    }

    pub fn param(&self, name: &str) -> Option<String> {
        self.query_params().into_iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }
}

/// In-process stand-in for the PocketBase collections API
#[derive(Clone, Default)]
pub struct FakeBackend {
    calls: Arc<Mutex<Vec<Recorded>>>,
    pub fail_types: bool,
}

impl FakeBackend {
    pub fn failing_types() -> Self {
        Self {
            fail_types: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: Method, path: &str) -> Vec<Recorded> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.path == path)
            .collect()
    }
}

fn resource_json(id: &str, fields: &Value) -> Value {
    json!({
        "id": id,
        "collectionId": "pbc_resources",
        "collectionName": "resources",
        "title": fields.get("title").cloned().unwrap_or(json!("The Rust Book")),
        "url": fields.get("url").cloned().unwrap_or(json!("https://doc.rust-lang.org/book/")),
        "description": fields.get("description").cloned().unwrap_or(json!("The official Rust book")),
        "tags": fields.get("tags").cloned().unwrap_or(json!("rust,book")),
        "type": fields.get("type").cloned().unwrap_or(json!("t1")),
        "created": "2024-05-01 10:00:00.000Z",
        "updated": "2024-05-01 10:00:00.000Z",
        "expand": { "type": { "id": "t1", "resource_type": "Book" } }
    })
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "code": 404, "message": "The requested resource wasn't found.", "data": {} })),
    )
        .into_response()
}

async fn handle(
    State(fake): State<FakeBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let body: Option<Value> = serde_json::from_slice(&body).ok();

    fake.calls.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.clone(),
    });

    let body = body.unwrap_or_else(|| json!({}));
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        (Method::GET, ["api", "health"]) => {
            Json(json!({ "code": 200, "message": "API is healthy." })).into_response()
        }
        (Method::GET, ["api", "collections", "resource_types", "records"]) => {
            if fake.fail_types {
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "boom" }))).into_response();
            }
            Json(json!({
                "page": 1, "perPage": 30, "totalItems": 2, "totalPages": 1,
                "items": [
                    { "id": "t1", "resource_type": "Book" },
                    { "id": "t2", "resource_type": "Video" }
                ]
            }))
            .into_response()
        }
        (Method::GET, ["api", "collections", "resources", "records"]) => {
            let page: u32 = url::form_urlencoded::parse(uri.query().unwrap_or("").as_bytes())
                .find(|(k, _)| k == "page")
                .and_then(|(_, v)| v.parse().ok())
                .unwrap_or(1);
            Json(json!({
                "page": page, "perPage": 30, "totalItems": 31, "totalPages": 2,
                "items": [resource_json("r1", &json!({}))]
            }))
            .into_response()
        }
        (Method::GET, ["api", "collections", "resources", "records", id]) => {
            if *id == "missing" {
                return not_found();
            }
            Json(resource_json(id, &json!({}))).into_response()
        }
        (Method::POST, ["api", "collections", "resources", "records"]) => {
            if body["title"] == "duplicate" {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "code": 400,
                        "message": "Failed to create record.",
                        "data": { "url": { "code": "validation_not_unique", "message": "Value must be unique." } }
                    })),
                )
                    .into_response();
            }
            Json(resource_json("new123", &body)).into_response()
        }
        (Method::PATCH, ["api", "collections", "resources", "records", id]) => {
            if *id == "missing" {
                return not_found();
            }
            Json(resource_json(id, &body)).into_response()
        }
        (Method::DELETE, ["api", "collections", "resources", "records", id]) => {
            if *id == "missing" {
                return not_found();
            }
            StatusCode::NO_CONTENT.into_response()
        }
        (Method::POST, ["api", "collections", "users", "auth-with-password"]) => {
            if body["password"] == PASSWORD {
                Json(json!({ "token": TOKEN, "record": { "id": "u1", "email": body["identity"] } })).into_response()
            } else {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "code": 400, "message": "Failed to authenticate.", "data": {} })),
                )
                    .into_response()
            }
        }
        (Method::POST, ["api", "collections", "users", "records"]) => {
            if body["email"] == TAKEN_EMAIL {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "code": 400,
                        "message": "Failed to create record.",
                        "data": { "email": { "code": "validation_not_unique", "message": "Value must be unique." } }
                    })),
                )
                    .into_response();
            }
            Json(json!({ "id": "u2", "email": body["email"] })).into_response()
        }
        (Method::GET, ["api", "collections", "broken", "records"]) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "<html>upstream exploded</html>").into_response()
        }
        (Method::GET, ["api", "collections", "empty", "records"]) => StatusCode::NO_CONTENT.into_response(),
        (Method::GET, ["api", "collections", "garbled", "records"]) => (StatusCode::OK, "not json").into_response(),
        _ => not_found(),
    }
}

/// Serve `fake` on a free local port and return its base URL
pub async fn spawn_backend(fake: FakeBackend) -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind fake backend")?;
    let router = Router::new().fallback(handle).with_state(fake);

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(format!("http://127.0.0.1:{}", port))
}

/// Application router wired to a fresh fake backend
pub struct TestApp {
    pub router: Router,
    pub fake: FakeBackend,
    pub backend_url: String,
}

impl TestApp {
    pub async fn start() -> Result<Self> {
        Self::with_fake(FakeBackend::default()).await
    }

    pub async fn with_fake(fake: FakeBackend) -> Result<Self> {
        let backend_url = spawn_backend(fake.clone()).await?;
        let config = AppConfig::development().with_backend_url(backend_url.clone());
        let state = AppState::new(config)?;
        Ok(Self {
            router: app(state),
            fake,
            backend_url,
        })
    }

    pub async fn send(&self, request: Request<Body>) -> Result<Response> {
        Ok(self.router.clone().oneshot(request).await?)
    }
}

pub fn get(uri: &str, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = session {
        builder = builder.header(header::COOKIE, format!("pb_auth={}", token));
    }
    builder.body(Body::empty()).expect("valid request")
}

pub fn post_form(uri: &str, fields: &[(&str, &str)], session: Option<&str>) -> Request<Body> {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = session {
        builder = builder.header(header::COOKIE, format!("pb_auth={}", token));
    }
    builder.body(Body::from(body)).expect("valid request")
}

pub async fn body_json(response: Response) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}
