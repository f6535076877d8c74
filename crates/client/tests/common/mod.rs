//! In-process fake of the Dreams REST API for integration tests.
//!
//! Serves `login/` and generic collection endpoints from in-memory JSON,
//! checks the `Authorization: Token <token>` header, records every request
//! and can be told to fail specific method/collection pairs with a 500.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use dreams_client::{AuthToken, DreamsApi, Session};

pub const TOKEN: &str = "test-token-123";
pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";

/// One request as seen by the fake server.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
}

#[derive(Default)]
pub struct FakeState {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    failing: Mutex<HashSet<(Method, String)>>,
    next_id: AtomicI64,
}

pub struct FakeApi {
    pub base_url: String,
    pub state: Arc<FakeState>,
}

impl FakeApi {
    /// Bind the fake API on an ephemeral port and serve it in the background.
    pub async fn start() -> Self {
        let state = Arc::new(FakeState {
            next_id: AtomicI64::new(1000),
            ..Default::default()
        });

        let app = Router::new()
            .route("/api/login/", post(login))
            .route("/api/{resource}/", get(list).post(create))
            .route(
                "/api/{resource}/{id}/",
                put(replace).patch(update).delete(remove),
            )
            .layer(middleware::from_fn_with_state(
                Arc::clone(&state),
                record_request,
            ))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api/"),
            state,
        }
    }

    pub fn api(&self) -> DreamsApi {
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        DreamsApi::with_client(client, &self.base_url).unwrap()
    }

    /// A session already holding the token the fake accepts.
    pub fn session(&self) -> Arc<Session> {
        Arc::new(Session::with_token(&AuthToken::new(TOKEN)).unwrap())
    }

    pub fn seed(&self, resource: &str, records: Vec<Value>) {
        self.state
            .collections
            .lock()
            .unwrap()
            .insert(resource.to_string(), records);
    }

    pub fn records(&self, resource: &str) -> Vec<Value> {
        self.state
            .collections
            .lock()
            .unwrap()
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    /// Make `method` on `resource` answer 500 until [`recover`](Self::recover).
    pub fn fail(&self, method: Method, resource: &str) {
        self.state
            .failing
            .lock()
            .unwrap()
            .insert((method, resource.to_string()));
    }

    pub fn recover(&self) {
        self.state.failing.lock().unwrap().clear();
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn age_group(id: i64, group: &str) -> Value {
    json!({"id": id, "group": group})
}

pub fn participant(id: i64, name: &str, age_group: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "age_group": age_group,
        "village": "Lilongwe",
        "has_hiv": false,
        "is_in_school": true,
        "dob": "2010-05-01",
        "enrollment_date": "2024-01-15",
        "age_group_details": {"id": age_group, "group": "10-14"}
    })
}

pub fn facilitator(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "dob": "1988-03-12",
        "gender": "F",
        "facilitates": "Life skills",
        "contact": null
    })
}

pub fn event(id: i64, name: &str, start: &str, end: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "event_type": "Workshop",
        "start_date": start,
        "end_date": end,
        "location": "Community hall",
        "facilitators": [],
        "lessons": "",
        "learning_outcomes": "",
        "facilitators_details": [],
        "event_attendances": []
    })
}

pub fn material(id: i64, name: &str, target_group: i64) -> Value {
    json!({"id": id, "name": name, "stock": 40, "target_group": target_group})
}

pub fn assignment(id: i64, material: i64, event: i64) -> Value {
    json!({"id": id, "material": material, "event": event, "quantity": 5})
}

pub fn attendance(id: i64, participant: i64, event: i64, finished: bool, sufficient: bool) -> Value {
    json!({
        "id": id,
        "participant": participant,
        "event": event,
        "skills": "Tailoring",
        "lessons_attended": 4,
        "finished_program": finished,
        "self_sufficient": sufficient
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn record_request(
    State(state): State<Arc<FakeState>>,
    request: Request,
    next: Next,
) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: request.method().clone(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
    });
    next.run(request).await
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Token {TOKEN}"))
}

fn guard(state: &FakeState, headers: &HeaderMap, method: Method, resource: &str) -> Option<Response> {
    if !authorized(headers) {
        return Some(
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"detail": "Authentication credentials were not provided."})),
            )
                .into_response(),
        );
    }
    if state
        .failing
        .lock()
        .unwrap()
        .contains(&(method, resource.to_string()))
    {
        return Some(
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"detail": "boom"}))).into_response(),
        );
    }
    None
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == USERNAME && body["password"] == PASSWORD {
        Json(json!({
            "token": TOKEN,
            "user_id": 1,
            "username": USERNAME,
            "first_name": "Ada",
            "last_name": "Admin"
        }))
        .into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"non_field_errors": ["Unable to log in with provided credentials."]})),
        )
            .into_response()
    }
}

async fn list(
    State(state): State<Arc<FakeState>>,
    Path(resource): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejection) = guard(&state, &headers, Method::GET, &resource) {
        return rejection;
    }
    let records = state
        .collections
        .lock()
        .unwrap()
        .get(&resource)
        .cloned()
        .unwrap_or_default();
    let records: Vec<Value> = match query.get("event").and_then(|e| e.parse::<i64>().ok()) {
        Some(event) => records.into_iter().filter(|r| r["event"] == event).collect(),
        None => records,
    };
    Json(records).into_response()
}

async fn create(
    State(state): State<Arc<FakeState>>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(rejection) = guard(&state, &headers, Method::POST, &resource) {
        return rejection;
    }
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    let mut record = body;
    record["id"] = json!(id);
    state
        .collections
        .lock()
        .unwrap()
        .entry(resource)
        .or_default()
        .push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn replace(
    State(state): State<Arc<FakeState>>,
    Path((resource, id)): Path<(String, i64)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(rejection) = guard(&state, &headers, Method::PUT, &resource) {
        return rejection;
    }
    write_record(&state, &resource, id, |existing| {
        let mut record = body.clone();
        record["id"] = json!(id);
        *existing = record;
    })
}

async fn update(
    State(state): State<Arc<FakeState>>,
    Path((resource, id)): Path<(String, i64)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(rejection) = guard(&state, &headers, Method::PATCH, &resource) {
        return rejection;
    }
    write_record(&state, &resource, id, |existing| {
        if let (Some(target), Some(patch)) = (existing.as_object_mut(), body.as_object()) {
            for (k, v) in patch {
                target.insert(k.clone(), v.clone());
            }
        }
    })
}

fn write_record<F>(state: &FakeState, resource: &str, id: i64, apply: F) -> Response
where
    F: FnOnce(&mut Value),
{
    let mut collections = state.collections.lock().unwrap();
    let Some(existing) = collections
        .get_mut(resource)
        .and_then(|records| records.iter_mut().find(|r| r["id"] == id))
    else {
        return not_found();
    };
    apply(existing);
    Json(existing.clone()).into_response()
}

async fn remove(
    State(state): State<Arc<FakeState>>,
    Path((resource, id)): Path<(String, i64)>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejection) = guard(&state, &headers, Method::DELETE, &resource) {
        return rejection;
    }
    let mut collections = state.collections.lock().unwrap();
    let Some(records) = collections.get_mut(&resource) else {
        return not_found();
    };
    let before = records.len();
    records.retain(|r| r["id"] != id);
    if records.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}
