//! In-process mock API for unit tests

use axum::{
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

/// Token issued by the mock login endpoint
pub const TEST_TOKEN: &str = "mock-token-emilys";
pub const TEST_USERNAME: &str = "emilys";
pub const TEST_PASSWORD: &str = "emilyspass";

fn header(headers: &HeaderMap, name: &str) -> Value {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map_or(Value::Null, |v| Value::String(v.to_string()))
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Value> {
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "accept": header(&headers, "accept"),
        "authorization": header(&headers, "authorization"),
        "trace": header(&headers, "x-trace"),
        "body": serde_json::from_str::<Value>(&body).ok(),
    }))
}

async fn login(Json(credentials): Json<Value>) -> (StatusCode, Json<Value>) {
    if credentials["username"] == TEST_USERNAME && credentials["password"] == TEST_PASSWORD {
        (
            StatusCode::OK,
            Json(json!({"accessToken": TEST_TOKEN, "username": TEST_USERNAME})),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Invalid credentials"})),
        )
    }
}

async fn me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let expected = format!("Bearer {TEST_TOKEN}");
    if header(&headers, "authorization") == Value::String(expected) {
        (
            StatusCode::OK,
            Json(json!({"id": 1, "username": TEST_USERNAME})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid/Expired Token!"})),
        )
    }
}

async fn plain_text() -> &'static str {
    "plain text"
}

/// Start the mock API on a random loopback port and return its base URL
pub async fn spawn_mock_api() -> String {
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/users/me", get(me))
        .route("/text", get(plain_text).post(plain_text))
        .route("/empty", get(|| async { StatusCode::NO_CONTENT }))
        .fallback(echo);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}
