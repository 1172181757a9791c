use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

use super::backend::CatalogBackend;
use super::error::{ApiFailure, ClientError};
use crate::config::BackendConfig;
use crate::filter::Filter;
use crate::models::{
    AuthResponse, ListPage, LoginRequest, RegisterRequest, Resource, ResourcePayload, ResourceType,
};

const RESOURCES: &str = "resources";
const RESOURCE_TYPES: &str = "resource_types";
const USERS: &str = "users";
/// Scratch origin used only to percent-encode record paths
const SEGMENT_BASE: &str = "http://records.invalid/";

/// `reqwest`-backed client for a PocketBase-compatible service.
///
/// This is the only place the application performs outbound HTTP.
#[derive(Debug, Clone)]
pub struct PbClient {
    base_url: String,
    http: reqwest::Client,
}

impl PbClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a path relative to `/api/collections`
    fn collection_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}/api/collections{}", self.base_url, path)
        } else {
            format!("{}/api/collections/{}", self.base_url, path)
        }
    }

    /// Perform one call against the collections API.
    ///
    /// Non-2xx responses become [`ClientError::Api`]; an unparseable error
    /// body is treated as `{}`. A 204 decodes `T` from an empty object.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Result<T, ClientError> {
        let url = self.collection_url(path);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        tracing::debug!(%method, %url, "backend request");
        let res = request.send().await?;
        let status = res.status();

        if !status.is_success() {
            let bytes = res.bytes().await.unwrap_or_default();
            let error_body: Value =
                serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::Object(Map::new()));
            tracing::error!(%url, status = status.as_u16(), body = %error_body, "API Error");
            return Err(ClientError::Api(ApiFailure::from_body(status.as_u16(), &error_body)));
        }

        if status == StatusCode::NO_CONTENT {
            return serde_json::from_value(Value::Object(Map::new()))
                .map_err(|e| ClientError::Decode(e.to_string()));
        }

        let bytes = res.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!(%url, "failed to decode backend response: {}", e);
            ClientError::Decode(e.to_string())
        })
    }

    /// `/{collection}/records/{id}` with each segment percent-encoded
    fn record_path(collection: &str, id: &str) -> Result<String, ClientError> {
        let mut url = Url::parse(SEGMENT_BASE).map_err(|e| ClientError::Transport(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Transport(format!("{} cannot hold path segments", SEGMENT_BASE)))?
            .clear()
            .extend([collection, "records", id]);
        Ok(url.path().to_string())
    }
}

#[async_trait]
impl CatalogBackend for PbClient {
    async fn health(&self) -> Result<(), ClientError> {
        let url = format!("{}/api/health", self.base_url);
        let res = self.http.get(&url).send().await?;
        if res.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::Api(ApiFailure::from_body(
                res.status().as_u16(),
                &Value::Object(Map::new()),
            )))
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Value, ClientError> {
        let body = serde_json::to_value(request).map_err(|e| ClientError::Decode(e.to_string()))?;
        self.send(Method::POST, &format!("/{}/records", USERS), Some(body), None)
            .await
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        let body = serde_json::to_value(request).map_err(|e| ClientError::Decode(e.to_string()))?;
        self.send(
            Method::POST,
            &format!("/{}/auth-with-password", USERS),
            Some(body),
            None,
        )
        .await
    }

    async fn list_types(&self) -> Result<ListPage<ResourceType>, ClientError> {
        self.send(
            Method::GET,
            &format!("/{}/records?sort=resource_type", RESOURCE_TYPES),
            None,
            None,
        )
        .await
    }

    async fn get_resource(&self, id: &str) -> Result<Resource, ClientError> {
        let path = format!("{}?expand=type", Self::record_path(RESOURCES, id)?);
        self.send(Method::GET, &path, None, None).await
    }

    async fn list_resources(&self, filter: &Filter) -> Result<ListPage<Resource>, ClientError> {
        let path = format!("/{}/records?{}", RESOURCES, filter.to_query_string());
        self.send(Method::GET, &path, None, None).await
    }

    async fn create_resource(&self, token: &str, payload: &ResourcePayload) -> Result<Resource, ClientError> {
        let body = serde_json::to_value(payload).map_err(|e| ClientError::Decode(e.to_string()))?;
        self.send(
            Method::POST,
            &format!("/{}/records", RESOURCES),
            Some(body),
            Some(token),
        )
        .await
    }

    async fn update_resource(
        &self,
        token: &str,
        id: &str,
        payload: &ResourcePayload,
    ) -> Result<Resource, ClientError> {
        let body = serde_json::to_value(payload).map_err(|e| ClientError::Decode(e.to_string()))?;
        self.send(Method::PATCH, &Self::record_path(RESOURCES, id)?, Some(body), Some(token))
            .await
    }

    async fn delete_resource(&self, token: &str, id: &str) -> Result<Value, ClientError> {
        self.send(Method::DELETE, &Self::record_path(RESOURCES, id)?, None, Some(token))
            .await
    }
}
