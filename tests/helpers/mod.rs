use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use prison_escape::routes::{router, AppState};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Create an in-memory test database with migrations applied
pub async fn setup_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Build the full application router on a fresh test database
pub async fn create_test_app() -> (Router, SqlitePool) {
    let pool = setup_test_pool().await;
    let app = router(AppState { pool: pool.clone() });

    (app, pool)
}

/// Issue a GET request, optionally with a session cookie
pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method(Method::GET).uri(uri);

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Issue a form POST, optionally with a session cookie
pub async fn post_form(
    app: &Router,
    uri: &str,
    form: &[(&str, &str)],
    cookie: Option<&str>,
) -> Response {
    let body = serde_urlencoded::to_string(form).unwrap();

    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    app.clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

/// Extract the `session_id=...` pair from a Set-Cookie header, if present
pub fn session_cookie(response: &Response) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = set_cookie.split(';').next()?;

    pair.starts_with("session_id=").then(|| pair.to_string())
}

/// Read the response body as a string
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Location header as a string
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response should carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// Sign up and log in a user, returning the session cookie
pub async fn login_as(app: &Router, username: &str, password: &str) -> String {
    let response = post_form(
        app,
        "/signup",
        &[
            ("username", username),
            ("password", password),
            ("confirm_password", password),
        ],
        None,
    )
    .await;
    assert_eq!(location(&response), "/login");

    let response = post_form(
        app,
        "/login",
        &[("username", username), ("password", password)],
        None,
    )
    .await;

    session_cookie(&response).expect("login should set a session cookie")
}
