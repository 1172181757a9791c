//! Cookie-backed session gate.
//!
//! The presence of a non-empty `pb_auth` cookie is the only signal of an
//! authenticated session. There is no server-side session store; whether the
//! token is still valid is decided by the backend when it is used.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const SESSION_COOKIE: &str = "pb_auth";
pub const SESSION_MAX_AGE_DAYS: i64 = 7;
pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Query parameter carrying the page to return to after login
pub const RETURN_TO_PARAM: &str = "redirectTo";
const REASON_PARAM: &str = "reason";
const REASON_AUTH_REQUIRED: &str = "auth_required";

/// Bearer token read from the session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Outcome of [`require`] when no session exists: a 303 to the login page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRedirect {
    target: String,
}

impl AuthRedirect {
    pub fn to_login(return_to: Option<&str>) -> Self {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(dest) = return_to.filter(|d| !d.is_empty()) {
            query.append_pair(RETURN_TO_PARAM, dest);
        }
        query.append_pair(REASON_PARAM, REASON_AUTH_REQUIRED);
        Self {
            target: format!("{}?{}", LOGIN_PATH, query.finish()),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to(&self.target).into_response()
    }
}

fn cookie_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Token for a protected action, or a redirect to login carrying `return_to`
pub fn require(jar: &CookieJar, return_to: Option<&str>) -> Result<SessionToken, AuthRedirect> {
    match cookie_token(jar) {
        Some(token) => Ok(SessionToken(token)),
        None => Err(AuthRedirect::to_login(return_to)),
    }
}

/// Whether a session cookie is present. Never redirects.
pub fn is_logged_in(jar: &CookieJar) -> bool {
    cookie_token(jar).is_some()
}

/// Cookie storing a freshly issued token
pub fn session_cookie(token: impl Into<String>, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.into()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(time::Duration::days(SESSION_MAX_AGE_DAYS))
        .build()
}

pub fn start_session(jar: CookieJar, token: impl Into<String>, secure: bool) -> CookieJar {
    jar.add(session_cookie(token, secure))
}

pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// Where to send the user after login. Only local absolute paths are
/// honoured; anything else goes home.
pub fn safe_return_path(candidate: Option<&str>) -> &str {
    match candidate {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => path,
        _ => HOME_PATH,
    }
}
