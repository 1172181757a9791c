// handlers/mod.rs - Two-tier handler layout
//
// Public (session optional) → Protected (session cookie required)
//
// Public handlers may look at the session to decide what to show but never
// require it. Protected handlers sit behind `session_gate_middleware` and
// receive the bearer token as a request extension.
pub mod health;
pub mod layout;
pub mod protected;
pub mod public;

pub use health::health;
