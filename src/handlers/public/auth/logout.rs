// handlers/public/auth/logout.rs - POST /logout handler

use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;

use crate::session;

/// Drop the session cookie and go home
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (session::clear_session(jar), Redirect::to(session::HOME_PATH))
}
