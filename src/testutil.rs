//! In-process mock of the admin REST backend, used by unit tests to observe
//! exactly which requests the client issues.

use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    /// Path relative to the api base, e.g. "/users/1"
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
}

/// Handle to a running mock backend. Canned users/roles are served as raw
/// JSON so tests control the wire shape; every request is recorded. When a
/// failure is armed, all handlers return it instead.
#[derive(Clone)]
pub struct MockBackend {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    users: Arc<Mutex<Value>>,
    roles: Arc<Mutex<Value>>,
    failure: Arc<Mutex<Option<(u16, Value)>>>,
}

impl MockBackend {
    fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            users: Arc::new(Mutex::new(json!([]))),
            roles: Arc::new(Mutex::new(json!([]))),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_users(&self, users: Value) {
        *self.users.lock().unwrap() = users;
    }

    pub fn set_roles(&self, roles: Value) {
        *self.roles.lock().unwrap() = roles;
    }

    /// Make every subsequent request fail with the given status and body
    pub fn fail_with(&self, status: u16, body: Value) {
        *self.failure.lock().unwrap() = Some((status, body));
    }

    pub fn clear_failure(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    fn record(&self, method: &str, path: String, query: Option<String>, body: Option<Value>) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            path,
            query,
            body,
        });
    }

    fn failure_response(&self) -> Option<Response> {
        self.failure
            .lock()
            .unwrap()
            .clone()
            .map(|(status, body)| {
                let status = StatusCode::from_u16(status).unwrap();
                (status, Json(body)).into_response()
            })
    }
}

/// Bind the mock backend on an ephemeral port and serve it in the
/// background. Returns the handle and the base URL to point a client at.
pub async fn spawn() -> (MockBackend, String) {
    let mock = MockBackend::new();

    let router = Router::new()
        .route("/api/admin/users", get(list_users).post(create_user))
        .route(
            "/api/admin/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/admin/roles", get(list_roles))
        .with_state(mock.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (mock, base_url)
}

async fn list_users(State(mock): State<MockBackend>, RawQuery(query): RawQuery) -> Response {
    mock.record("GET", "/users".to_string(), query, None);
    if let Some(response) = mock.failure_response() {
        return response;
    }
    Json(mock.users.lock().unwrap().clone()).into_response()
}

async fn get_user(
    State(mock): State<MockBackend>,
    Path(id): Path<i64>,
    RawQuery(query): RawQuery,
) -> Response {
    mock.record("GET", format!("/users/{}", id), query, None);
    if let Some(response) = mock.failure_response() {
        return response;
    }

    let users = mock.users.lock().unwrap().clone();
    let found = users
        .as_array()
        .and_then(|list| list.iter().find(|u| u["id"].as_i64() == Some(id)).cloned());

    match found {
        Some(user) => Json(user).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "User not found"})),
        )
            .into_response(),
    }
}

async fn list_roles(State(mock): State<MockBackend>, RawQuery(query): RawQuery) -> Response {
    mock.record("GET", "/roles".to_string(), query, None);
    if let Some(response) = mock.failure_response() {
        return response;
    }
    Json(mock.roles.lock().unwrap().clone()).into_response()
}

async fn create_user(
    State(mock): State<MockBackend>,
    RawQuery(query): RawQuery,
    Json(body): Json<Value>,
) -> Response {
    mock.record("POST", "/users".to_string(), query, Some(body.clone()));
    if let Some(response) = mock.failure_response() {
        return response;
    }

    // Echo the submitted user back with a server-assigned id
    let mut created = body;
    created["id"] = json!(100);
    Json(created).into_response()
}

async fn update_user(
    State(mock): State<MockBackend>,
    Path(id): Path<i64>,
    RawQuery(query): RawQuery,
    Json(body): Json<Value>,
) -> Response {
    mock.record("PUT", format!("/users/{}", id), query, Some(body.clone()));
    if let Some(response) = mock.failure_response() {
        return response;
    }

    let mut updated = body;
    updated["id"] = json!(id);
    Json(updated).into_response()
}

async fn delete_user(
    State(mock): State<MockBackend>,
    Path(id): Path<i64>,
    RawQuery(query): RawQuery,
) -> Response {
    mock.record("DELETE", format!("/users/{}", id), query, None);
    if let Some(response) = mock.failure_response() {
        return response;
    }
    StatusCode::OK.into_response()
}
