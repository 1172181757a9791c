// handlers/public/resources/mod.rs - Catalog pages

pub mod list;
pub mod show;

pub use list::list;
pub use show::show;
