//! In-process stand-in for the backend, for gateway and flow tests.
//!
//! Routes are matched on method and path only. Every request is recorded so
//! tests can assert on what went over the wire. Unknown routes answer 404
//! with `{"detail":"Not Found"}`.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tokio::{net::TcpListener, task::JoinHandle};

/// A request as seen by the stub.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Value,
}

#[derive(Debug, Clone)]
struct CannedResponse {
    status: StatusCode,
    body: String,
}

#[derive(Debug, Default)]
struct StubState {
    routes: HashMap<(String, String), CannedResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

#[derive(Debug, Default)]
pub struct StubBackendBuilder {
    routes: HashMap<(String, String), CannedResponse>,
}

impl StubBackendBuilder {
    /// Answer `method path` with `status` and a raw body.
    #[must_use]
    pub fn route(mut self, method: &str, path: &str, status: u16, body: impl Into<String>) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.routes.insert(
            (method.to_ascii_uppercase(), path.to_string()),
            CannedResponse {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Answer `method path` with `200` and a JSON body.
    #[must_use]
    pub fn json(self, method: &str, path: &str, body: &Value) -> Self {
        self.route(method, path, 200, body.to_string())
    }

    /// Bind to an ephemeral local port and start serving.
    ///
    /// # Panics
    /// Panics when no local port can be bound.
    pub async fn start(self) -> StubBackend {
        let state = Arc::new(StubState {
            routes: self.routes,
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("stub backend address");
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        StubBackend { addr, state, task }
    }
}

/// Running stub; stops serving when dropped.
#[derive(Debug)]
pub struct StubBackend {
    addr: SocketAddr,
    state: Arc<StubState>,
    task: JoinHandle<()>,
}

impl StubBackend {
    #[must_use]
    pub fn builder() -> StubBackendBuilder {
        StubBackendBuilder::default()
    }

    /// Base URL with the `/api` prefix the real backend mounts its routes under.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Requests received so far, oldest first.
    ///
    /// # Panics
    /// Panics if a handler panicked while holding the log.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("request log").clone()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    if let Ok(mut log) = state.requests.lock() {
        log.push(RecordedRequest {
            method: method.to_string(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            body,
        });
    }

    let key = (method.to_string(), uri.path().to_string());
    let canned = state.routes.get(&key).cloned().unwrap_or(CannedResponse {
        status: StatusCode::NOT_FOUND,
        body: r#"{"detail":"Not Found"}"#.to_string(),
    });
    (
        canned.status,
        [(header::CONTENT_TYPE, "application/json")],
        canned.body,
    )
        .into_response()
}
