use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::session;

/// Gate for protected routes.
///
/// Without a session cookie the request never reaches the handler and the
/// client is redirected to login with the requested path as destination.
/// Otherwise the [`session::SessionToken`] is stored in request extensions.
pub async fn session_gate_middleware(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let destination = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string());

    match session::require(&jar, destination.as_deref()) {
        Ok(token) => {
            request.extensions_mut().insert(token);
            next.run(request).await
        }
        Err(redirect) => {
            tracing::info!(login_url = redirect.target(), "session required, redirecting to login");
            redirect.into_response()
        }
    }
}
