pub mod backend;
pub mod error;
pub mod pocketbase;

pub use backend::CatalogBackend;
pub use error::{ApiFailure, ClientError, FALLBACK_MESSAGE};
pub use pocketbase::PbClient;
