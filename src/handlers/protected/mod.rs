// handlers/protected/mod.rs - Protected handlers (session cookie required)
//
// Every route here is wrapped in `session_gate_middleware`. Anonymous
// requests are redirected to /login before reaching a handler, so handlers
// can extract `Extension<SessionToken>` unconditionally and pass it to the
// backend as the bearer credential.

pub mod resources;
