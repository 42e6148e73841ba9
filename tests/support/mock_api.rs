//! In-process stand-in for the dummyjson demo API
//!
//! Serves the subset of endpoints the feature files exercise: login, the
//! authenticated user, and CRUD on `/users`.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

pub const TOKEN: &str = "mock-access-token-emilys";
pub const USERNAME: &str = "emilys";
pub const PASSWORD: &str = "emilyspass";

type Reply = (StatusCode, Json<Value>);

fn user(id: u64) -> Option<Value> {
    match id {
        1 => Some(json!({
            "id": 1,
            "firstName": "Emily",
            "lastName": "Johnson",
            "age": 28,
            "gender": "female",
            "email": "emily.johnson@x.dummyjson.com",
            "username": USERNAME,
            "role": "admin",
            "address": {
                "address": "626 Main Street",
                "city": "Phoenix",
                "state": "Mississippi",
                "postalCode": "29112"
            },
            "hair": { "color": "Brown", "type": "Curly" },
            "tags": ["admin", "early-adopter"]
        })),
        2 => Some(json!({
            "id": 2,
            "firstName": "Michael",
            "lastName": "Williams",
            "age": 35,
            "gender": "male",
            "email": "michael.williams@x.dummyjson.com",
            "username": "michaelw",
            "role": "admin",
            "address": {
                "address": "385 Fifth Street",
                "city": "Houston",
                "state": "Alabama",
                "postalCode": "38807"
            },
            "hair": { "color": "Green", "type": "Straight" },
            "tags": []
        })),
        _ => None,
    }
}

fn not_found(id: &str) -> Reply {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("User with id '{id}' not found") })),
    )
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn login(Json(credentials): Json<Value>) -> Reply {
    if credentials["username"] == USERNAME && credentials["password"] == PASSWORD {
        let mut body = user(1).unwrap_or_default();
        body["accessToken"] = json!(TOKEN);
        body["refreshToken"] = json!("mock-refresh-token");
        (StatusCode::OK, Json(body))
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Invalid credentials" })),
        )
    }
}

async fn me(headers: HeaderMap) -> Reply {
    if authorized(&headers) {
        (StatusCode::OK, Json(user(1).unwrap_or_default()))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid/Expired Token!" })),
        )
    }
}

async fn list_users(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let users: Vec<Value> = (1..=2).filter_map(user).collect();
    let total = users.len();
    let skip = query.get("skip").and_then(|s| s.parse().ok()).unwrap_or(0usize);
    let limit = query
        .get("limit")
        .and_then(|s| s.parse().ok())
        .unwrap_or(30usize);
    let page: Vec<Value> = users.into_iter().skip(skip).take(limit).collect();
    Json(json!({ "users": page, "total": total, "skip": skip, "limit": limit }))
}

async fn get_user(Path(id): Path<String>) -> Reply {
    match id.parse().ok().and_then(user) {
        Some(u) => (StatusCode::OK, Json(u)),
        None => not_found(&id),
    }
}

async fn add_user(Json(mut body): Json<Value>) -> Reply {
    body["id"] = json!(209);
    (StatusCode::CREATED, Json(body))
}

async fn update_user(Path(id): Path<String>, Json(changes): Json<Value>) -> Reply {
    let Some(mut current) = id.parse().ok().and_then(user) else {
        return not_found(&id);
    };
    if let (Some(fields), Some(changes)) = (current.as_object_mut(), changes.as_object()) {
        for (k, v) in changes {
            fields.insert(k.clone(), v.clone());
        }
    }
    (StatusCode::OK, Json(current))
}

async fn delete_user(Path(id): Path<String>) -> Reply {
    let Some(mut current) = id.parse().ok().and_then(user) else {
        return not_found(&id);
    };
    current["isDeleted"] = json!(true);
    current["deletedOn"] = json!("2024-01-01T00:00:00.000Z");
    (StatusCode::OK, Json(current))
}

/// Start the mock on a random loopback port and return its base URL
pub async fn spawn() -> String {
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/users/me", get(me))
        .route("/users", get(list_users))
        .route("/users/add", post(add_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/text", get(|| async { "plain text" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock API");
    let addr = listener.local_addr().expect("mock API address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock API");
    });

    format!("http://{addr}")
}
