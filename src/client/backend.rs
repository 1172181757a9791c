use async_trait::async_trait;
use serde_json::Value;

use super::error::ClientError;
use crate::filter::Filter;
use crate::models::{
    AuthResponse, ListPage, LoginRequest, RegisterRequest, Resource, ResourcePayload, ResourceType,
};

/// Operations the web layer needs from the backing service.
///
/// Mutating calls take the bearer token explicitly; checking that one exists
/// is the caller's job.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    async fn health(&self) -> Result<(), ClientError>;

    async fn register(&self, request: &RegisterRequest) -> Result<Value, ClientError>;

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError>;

    async fn list_types(&self) -> Result<ListPage<ResourceType>, ClientError>;

    async fn get_resource(&self, id: &str) -> Result<Resource, ClientError>;

    async fn list_resources(&self, filter: &Filter) -> Result<ListPage<Resource>, ClientError>;

    async fn create_resource(&self, token: &str, payload: &ResourcePayload) -> Result<Resource, ClientError>;

    async fn update_resource(
        &self,
        token: &str,
        id: &str,
        payload: &ResourcePayload,
    ) -> Result<Resource, ClientError>;

    async fn delete_resource(&self, token: &str, id: &str) -> Result<Value, ClientError>;
}
