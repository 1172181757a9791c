pub mod auth;
pub mod list;
pub mod resource;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use list::ListPage;
pub use resource::{Resource, ResourceExpand, ResourcePayload, ResourceType};
