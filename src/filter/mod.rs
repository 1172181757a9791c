pub mod types;
pub mod filter;
pub mod filter_where;
pub mod filter_order;
pub mod error;

pub use types::*;
pub use error::FilterError;
pub use filter::{Filter, ALL_TYPES, DEFAULT_PER_PAGE, DEFAULT_SORT};
