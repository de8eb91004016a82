
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use futures_util::stream::{self, StreamExt};
use rlookup_completion::{
    CompletionError, CompletionProvider, CompletionRequest, ProviderMetadata, TokenStream,
};
use rlookup_core::{HistoryStore, MemoryKv, MemoryProvider};
use tower::ServiceExt;

use crate::server::router;
use crate::state::AppState;

pub const ADMIN_PASSWORD: &str = "letmein";

/// What the fake model does with a request
#[derive(Clone)]
pub enum Script {
    Reply(Vec<&'static str>),
    Reject(fn() -> CompletionError),
    BreakAfter(Vec<&'static str>),
}

pub struct FakeCompletion {
    script: Script,
}

#[async_trait::async_trait]
impl CompletionProvider for FakeCompletion {
    async fn stream(&self, request: &CompletionRequest) -> Result<TokenStream, CompletionError> {
        request.validate()?;

        let tokens = match &self.script {
            Script::Reject(error) => return Err(error()),
            Script::Reply(tokens) => tokens.iter().map(|t| Ok(t.to_string())).collect(),
            Script::BreakAfter(tokens) => {
                let mut items: Vec<Result<String, CompletionError>> =
                    tokens.iter().map(|t| Ok(t.to_string())).collect();
                items.push(Err(CompletionError::ApiError("connection reset".to_string())));
                items
            }
        };
        Ok(stream::iter(tokens).boxed())
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
            model: "fake-1".to_string(),
            requires_api_key: false,
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub kv: Arc<MemoryKv>,
}

pub fn test_app(script: Script) -> TestApp {
    let kv = Arc::new(MemoryKv::new());
    let history = HistoryStore::new(Arc::new(MemoryProvider::new(kv.clone())), ADMIN_PASSWORD);
    let state = AppState::new(Arc::new(history), Arc::new(FakeCompletion { script }));

    TestApp {
        router: router(state),
        kv,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is UTF-8")
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    collect(app, request.body(body).expect("request builds")).await
}

/// Send `body` with no content-type header, as plain `fetch` or curl calls do
pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .expect("request builds");

    collect(app, request).await
}

async fn collect(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await;

    TestResponse {
        status,
        headers,
        body: body.map(|b| b.to_vec()).unwrap_or_default(),
    }
}

/// Like `send`, but reports a body that broke off mid-stream as `Err`
pub async fn send_streaming(app: &Router, uri: &str, json: &str) -> (StatusCode, Result<String, String>) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .expect("request builds");

    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .map(|b| String::from_utf8_lossy(&b).into_owned())
        .map_err(|e| e.to_string());

    (status, body)
}
