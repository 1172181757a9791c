// handlers/public/mod.rs - Public handlers (no session required)
//
// Catalog browsing plus token acquisition. These handlers may read the
// session cookie to tailor the page but never redirect because it is absent.

pub mod auth;
pub mod resources;
