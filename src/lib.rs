pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod session;

pub use app::{app, AppState};
