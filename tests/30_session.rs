mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use common::{body_json, get, location, post_form, set_cookies, TestApp, PASSWORD, TAKEN_EMAIL, TOKEN};

fn resource_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("title", "The Rust Book"),
        ("url", "https://doc.rust-lang.org/book/"),
        ("description", "The official Rust book"),
        ("type", "t1"),
        ("tags", "rust"),
    ]
}

#[tokio::test]
async fn protected_action_without_cookie_redirects_to_login() -> Result<()> {
    let test = TestApp::start().await?;

    let res = test.send(post_form("/resources", &resource_fields(), None)).await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&res).as_deref(),
        Some("/login?redirectTo=%2Fresources&reason=auth_required")
    );
    assert!(test.fake.calls().is_empty(), "no backend call without a session");
    Ok(())
}

#[tokio::test]
async fn every_protected_route_is_gated() -> Result<()> {
    let test = TestApp::start().await?;

    for uri in ["/resources/delete", "/resources/r1/edit", "/resources/r1/delete"] {
        let res = test.send(post_form(uri, &[("id", "r1")], None)).await?;
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{}", uri);
        let target = location(&res).unwrap_or_default();
        assert!(target.starts_with("/login?redirectTo="), "{}", target);
        assert!(target.ends_with("reason=auth_required"), "{}", target);
    }

    let res = test.send(post_form("/resources/r1/delete", &[], Some(""))).await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER, "empty cookie is anonymous");

    assert!(test.fake.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn login_sets_session_cookie_and_goes_home() -> Result<()> {
    let test = TestApp::start().await?;

    let res = test
        .send(post_form(
            "/login",
            &[("email", "user@example.com"), ("password", PASSWORD)],
            None,
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/"));

    let cookies = set_cookies(&res);
    assert_eq!(cookies.len(), 1);
    let cookie = &cookies[0];
    assert!(cookie.starts_with(&format!("pb_auth={}", TOKEN)), "{}", cookie);
    assert!(cookie.contains("HttpOnly"), "{}", cookie);
    assert!(cookie.contains("SameSite=Strict"), "{}", cookie);
    assert!(cookie.contains("Path=/"), "{}", cookie);
    assert!(cookie.contains("Max-Age=604800"), "{}", cookie);
    assert!(!cookie.contains("Secure"), "development cookies are not Secure");

    let calls = test.fake.calls_to(Method::POST, "/api/collections/users/auth-with-password");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body.as_ref().expect("json body")["identity"], "user@example.com");
    Ok(())
}

#[tokio::test]
async fn login_honours_local_return_path_only() -> Result<()> {
    let test = TestApp::start().await?;
    let creds = [("email", "user@example.com"), ("password", PASSWORD)];

    let res = test
        .send(post_form("/login?redirectTo=%2Fresources%2Fr1", &creds, None))
        .await?;
    assert_eq!(location(&res).as_deref(), Some("/resources/r1"));

    let res = test
        .send(post_form("/login?redirectTo=%2F%2Fevil.example", &creds, None))
        .await?;
    assert_eq!(location(&res).as_deref(), Some("/"));
    Ok(())
}

#[tokio::test]
async fn bad_credentials_do_not_start_a_session() -> Result<()> {
    let test = TestApp::start().await?;

    let res = test
        .send(post_form(
            "/login",
            &[("email", "user@example.com"), ("password", "wrong")],
            None,
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookies(&res).is_empty());

    let body = body_json(res).await?;
    assert_eq!(body["message"], "Invalid email or password");
    Ok(())
}

#[tokio::test]
async fn malformed_login_form_never_reaches_backend() -> Result<()> {
    let test = TestApp::start().await?;

    let res = test
        .send(post_form("/login", &[("email", "not-an-email"), ("password", "")], None))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = body_json(res).await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["email"].is_string());
    assert!(body["field_errors"]["password"].is_string());
    assert!(test.fake.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn login_page_redirects_when_already_logged_in() -> Result<()> {
    let test = TestApp::start().await?;

    let res = test.send(get("/login", Some(TOKEN))).await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/"));

    let res = test
        .send(get("/login?redirectTo=%2Fresources&reason=auth_required", None))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await?;
    assert_eq!(body["data"]["redirect_to"], "/resources");
    assert_eq!(body["data"]["reason"], "auth_required");
    Ok(())
}

#[tokio::test]
async fn logout_clears_cookie() -> Result<()> {
    let test = TestApp::start().await?;

    let res = test.send(post_form("/logout", &[], Some(TOKEN))).await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/"));

    let cookies = set_cookies(&res);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("pb_auth="), "{}", cookies[0]);
    assert!(cookies[0].contains("Max-Age=0"), "{}", cookies[0]);
    assert!(cookies[0].contains("Path=/"), "{}", cookies[0]);
    Ok(())
}

#[tokio::test]
async fn register_redirects_to_login() -> Result<()> {
    let test = TestApp::start().await?;

    let res = test
        .send(post_form(
            "/register",
            &[
                ("email", "new@example.com"),
                ("password", "password123"),
                ("passwordConfirm", "password123"),
            ],
            None,
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/login"));
    assert!(set_cookies(&res).is_empty(), "registration does not log in");
    Ok(())
}

#[tokio::test]
async fn register_reports_backend_field_errors() -> Result<()> {
    let test = TestApp::start().await?;

    let res = test
        .send(post_form(
            "/register",
            &[
                ("email", TAKEN_EMAIL),
                ("password", "password123"),
                ("passwordConfirm", "password123"),
            ],
            None,
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = body_json(res).await?;
    assert_eq!(body["field_errors"]["email"], "Value must be unique.");
    Ok(())
}

#[tokio::test]
async fn register_rejects_mismatched_passwords_locally() -> Result<()> {
    let test = TestApp::start().await?;

    let res = test
        .send(post_form(
            "/register",
            &[
                ("email", "new@example.com"),
                ("password", "password123"),
                ("passwordConfirm", "password124"),
            ],
            None,
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = body_json(res).await?;
    assert_eq!(body["field_errors"]["passwordConfirm"], "Passwords do not match");
    assert_eq!(body["field_errors"].as_object().map(|f| f.len()), Some(1));
    assert!(test.fake.calls().is_empty());
    Ok(())
}
