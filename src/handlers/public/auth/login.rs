// handlers/public/auth/login.rs - GET/POST /login handlers

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::AppState;
use crate::client::ClientError;
use crate::error::ApiError;
use crate::forms::{self, LoginForm, FORM_INVALID};
use crate::middleware::ApiResponse;
use crate::session;

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    /// Page to return to once logged in
    #[serde(rename = "redirectTo")]
    pub redirect_to: Option<String>,
    /// Why the user was sent here, e.g. `auth_required`
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginPageData {
    pub form: LoginForm,
    pub redirect_to: Option<String>,
    pub reason: Option<String>,
}

/// GET /login - empty form, or home when a session already exists
pub async fn login_page(jar: CookieJar, Query(query): Query<LoginQuery>) -> Response {
    if session::is_logged_in(&jar) {
        return Redirect::to(session::HOME_PATH).into_response();
    }

    ApiResponse::success(LoginPageData {
        form: LoginForm::default(),
        redirect_to: query.redirect_to,
        reason: query.reason,
    })
    .into_response()
}

/// POST /login - exchange credentials for a session cookie
///
/// Any rejection by the backend is reported as bad credentials so the
/// response does not reveal which part was wrong.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    if let Err(errors) = form.validate() {
        return Err(ApiError::validation_error(FORM_INVALID, Some(forms::field_errors(&errors))));
    }

    let email = form.email.clone();
    let auth = state
        .backend
        .login(&form.into_request())
        .await
        .map_err(|e| match e {
            ClientError::Api(failure) => {
                tracing::warn!(%email, status = failure.status, "login rejected");
                ApiError::bad_request("Invalid email or password")
            }
            other => {
                tracing::error!("login failed: {}", other);
                ApiError::internal_server_error("Something went wrong")
            }
        })?;

    tracing::info!(%email, "login succeeded");

    let jar = session::start_session(jar, auth.token, state.config.session.secure_cookie);
    let destination = session::safe_return_path(query.redirect_to.as_deref()).to_string();
    Ok((jar, Redirect::to(&destination)))
}
