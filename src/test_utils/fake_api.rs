//! A stand-in for the remote marketplace API.
//!
//! Serves an axum router on an ephemeral local port and records every request
//! it receives, so tests can check which remote calls were made.

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::{Body, Bytes},
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::{self, Next},
    response::Response,
};
use tokio::net::TcpListener;

use crate::ApiClient;

/// A request received by a [FakeApi].
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Bytes,
}

impl RecordedCall {
    #[track_caller]
    pub(crate) fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Request body is not JSON")
    }
}

type CallLog = Arc<Mutex<Vec<RecordedCall>>>;

pub(crate) struct FakeApi {
    client: ApiClient,
    calls: CallLog,
}

impl FakeApi {
    /// Serve `router` and return a handle with a client pointed at it.
    pub(crate) async fn start(router: Router) -> Self {
        let calls = CallLog::default();
        let app = router.layer(middleware::from_fn_with_state(calls.clone(), record_call));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind fake API listener");
        let address = listener
            .local_addr()
            .expect("Could not get fake API address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Fake API server failed");
        });

        Self {
            client: ApiClient::new(&format!("http://{address}")),
            calls,
        }
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The requests received so far, oldest first.
    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

async fn record_call(State(calls): State<CallLog>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Could not read request body");

    calls.lock().unwrap().push(RecordedCall {
        method: parts.method.to_string(),
        path: parts.uri.path().to_owned(),
        query: parts.uri.query().map(str::to_owned),
        authorization: parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
        body: body.clone(),
    });

    next.run(Request::from_parts(parts, Body::from(body))).await
}
