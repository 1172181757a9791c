// handlers/public/auth/register.rs - GET/POST /register handlers

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use validator::Validate;

use crate::app::AppState;
use crate::client::ClientError;
use crate::error::ApiError;
use crate::forms::{self, RegisterForm, FORM_INVALID};
use crate::middleware::ApiResponse;
use crate::session;

#[derive(Debug, Serialize)]
pub struct RegisterPageData {
    pub form: RegisterForm,
}

/// GET /register - empty form, or home when a session already exists
pub async fn register_page(jar: CookieJar) -> Response {
    if session::is_logged_in(&jar) {
        return Redirect::to(session::HOME_PATH).into_response();
    }

    ApiResponse::success(RegisterPageData {
        form: RegisterForm::default(),
    })
    .into_response()
}

/// POST /register - create an account, then send the user to login
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect, ApiError> {
    if let Err(errors) = form.validate() {
        return Err(ApiError::validation_error(FORM_INVALID, Some(forms::field_errors(&errors))));
    }

    let email = form.email.clone();
    match state.backend.register(&form.into_request()).await {
        Ok(_) => {
            tracing::info!(%email, "account registered");
            Ok(Redirect::to(session::LOGIN_PATH))
        }
        // Backend validation (e.g. email already in use) lands on the form fields
        Err(ClientError::Api(failure)) if failure.has_field_errors() => {
            Err(ApiError::validation_error(failure.message, Some(failure.field_errors)))
        }
        Err(ClientError::Api(failure)) => Err(ApiError::bad_request(failure.message)),
        Err(other) => {
            tracing::error!("registration failed: {}", other);
            Err(ApiError::internal_server_error("Something went wrong."))
        }
    }
}
