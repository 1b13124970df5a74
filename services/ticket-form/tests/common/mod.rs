/// Common test utilities: an in-process ticket intake endpoint
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
struct StubState {
    received: Arc<Mutex<Vec<Value>>>,
    status: StatusCode,
    body: &'static str,
}

/// Running stub intake (lives until the test's runtime shuts down)
pub struct StubIntake {
    pub url: String,
    received: Arc<Mutex<Vec<Value>>>,
}

impl StubIntake {
    /// Start a stub answering every POST with `status` and `body`
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            received: received.clone(),
            status,
            body,
        };

        let app = Router::new()
            .route("/api/tickets", post(receive_ticket))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub intake");
        let addr = listener.local_addr().expect("Failed to read stub address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Stub intake crashed");
        });

        Self {
            url: format!("http://{}/api/tickets", addr),
            received,
        }
    }

    pub async fn received(&self) -> Vec<Value> {
        self.received.lock().await.clone()
    }
}

async fn receive_ticket(
    State(state): State<StubState>,
    Json(body): Json<Value>,
) -> (StatusCode, &'static str) {
    state.received.lock().await.push(body);
    (state.status, state.body)
}

/// URL on a local port nothing listens on
#[allow(dead_code)]
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind spare port");
    let addr = listener.local_addr().expect("Failed to read spare address");
    drop(listener);
    format!("http://{}/api/tickets", addr)
}
