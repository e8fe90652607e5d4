use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

pub const TEST_KEY: &str = "test-anon-key";

/// Minimal stand-in for a PostgREST table endpoint, keeps inserted rows in memory.
#[derive(Clone, Default)]
pub struct FakeStore {
    inner: Arc<FakeStoreInner>,
}

#[derive(Default)]
struct FakeStoreInner {
    rows: Mutex<Vec<(String, Value)>>,
    failure: Mutex<Option<String>>,
    requests: AtomicUsize,
}

impl FakeStore {
    pub async fn start() -> Result<(Self, Url)> {
        let store = FakeStore::default();
        let app = Router::new()
            .route("/rest/v1/{table}", post(insert))
            .with_state(store.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let url = Url::parse(&format!("http://{}", listener.local_addr()?))?;
        debug!("Fake store listening on {url}");
        tokio::spawn(async move { axum::serve(listener, app).await });
        Ok((store, url))
    }

    pub fn rows(&self) -> Vec<(String, Value)> {
        self.inner.rows.lock().unwrap().clone()
    }

    pub fn requests(&self) -> usize {
        self.inner.requests.load(Ordering::SeqCst)
    }

    /// Following inserts are refused with this message
    pub fn fail_with(&self, message: &str) {
        *self.inner.failure.lock().unwrap() = Some(message.to_string());
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    header("apikey") == Some(TEST_KEY)
        && header("authorization") == Some(format!("Bearer {TEST_KEY}").as_str())
}

async fn insert(
    State(store): State<FakeStore>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(rows): Json<Vec<Value>>,
) -> Response {
    store.inner.requests.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid API key", "hint": "Double check your key"})),
        )
            .into_response();
    }
    if let Some(message) = store.inner.failure.lock().unwrap().clone() {
        return (
            StatusCode::CONFLICT,
            Json(json!({"code": "23505", "details": null, "hint": null, "message": message})),
        )
            .into_response();
    }
    let mut stored = store.inner.rows.lock().unwrap();
    stored.extend(rows.into_iter().map(|row| (table.clone(), row)));
    StatusCode::CREATED.into_response()
}
