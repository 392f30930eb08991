//! In-memory transport for tests.
//!
//! Replies are registered per `(method, path)` and consumed in order; the last
//! reply for a route keeps answering. Every request is recorded so tests can
//! assert on call counts and payloads.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde_json::{Value, json};

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Method, RequestBody, Transport};

/// What the mock saw for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub json: Option<Value>,
    /// Multipart field name, for uploads.
    pub field: Option<String>,
    /// Uploaded file names, for uploads.
    pub files: Vec<String>,
    pub bearer: Option<String>,
}

#[derive(Debug, Clone)]
enum Reply {
    Response { status: u16, body: Vec<u8> },
    Unreachable { timed_out: bool },
}

#[derive(Debug, Clone)]
struct Scripted {
    reply: Reply,
    delay: Option<Duration>,
}

#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    recorded: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) -> &Self {
        lock(&self.routes)
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
        self
    }

    /// Answer `method path` with `status` and a JSON body.
    pub fn reply(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.reply_after(method, path, Duration::ZERO, status, body)
    }

    /// Like [`reply`](Self::reply), after a delay measured on the tokio clock.
    pub fn reply_after(
        &self,
        method: Method,
        path: &str,
        delay: Duration,
        status: u16,
        body: Value,
    ) -> &Self {
        let body = if body.is_null() {
            Vec::new()
        } else {
            body.to_string().into_bytes()
        };
        self.push(
            method,
            path,
            Scripted {
                reply: Reply::Response { status, body },
                delay: (!delay.is_zero()).then_some(delay),
            },
        )
    }

    /// Answer with a raw, possibly non-JSON body.
    pub fn reply_raw(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.push(
            method,
            path,
            Scripted {
                reply: Reply::Response {
                    status,
                    body: body.as_bytes().to_vec(),
                },
                delay: None,
            },
        )
    }

    /// Fail `method path` without a response, as a dropped connection would.
    pub fn unreachable(&self, method: Method, path: &str) -> &Self {
        self.push(
            method,
            path,
            Scripted {
                reply: Reply::Unreachable { timed_out: false },
                delay: None,
            },
        )
    }

    /// Fail `method path` with a timeout after `delay`.
    pub fn time_out_after(&self, method: Method, path: &str, delay: Duration) -> &Self {
        self.push(
            method,
            path,
            Scripted {
                reply: Reply::Unreachable { timed_out: true },
                delay: Some(delay),
            },
        )
    }

    /// Every request seen so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.recorded).clone()
    }

    /// Number of requests seen for `method path`.
    #[must_use]
    pub fn count(&self, method: Method, path: &str) -> usize {
        lock(&self.recorded)
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    fn next_reply(&self, method: Method, path: &str) -> Option<Scripted> {
        let mut routes = lock(&self.routes);
        let queue = routes.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let (json, field, files) = match &request.body {
            RequestBody::Empty => (None, None, Vec::new()),
            RequestBody::Json(body) => (Some(body.clone()), None, Vec::new()),
            RequestBody::Multipart { field, files } => (
                None,
                Some(field.clone()),
                files.iter().map(|f| f.file_name.clone()).collect(),
            ),
        };
        lock(&self.recorded).push(RecordedRequest {
            method: request.method,
            path: request.path.clone(),
            json,
            field,
            files,
            bearer: request.bearer.clone(),
        });

        let Some(scripted) = self.next_reply(request.method, &request.path) else {
            let message = format!("no mock for {} {}", request.method.as_str(), request.path);
            return Ok(ApiResponse {
                status: 404,
                body: json!({ "message": message }).to_string().into_bytes(),
            });
        };

        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        match scripted.reply {
            Reply::Response { status, body } => Ok(ApiResponse { status, body }),
            Reply::Unreachable { timed_out } => Err(ApiError::Unreachable {
                reason: if timed_out {
                    "operation timed out".into()
                } else {
                    "connection refused".into()
                },
                timed_out,
            }),
        }
    }
}
