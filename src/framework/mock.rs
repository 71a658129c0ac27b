//! # Mock Transport
//!
//! [`MockTransport`] stands in for the network in tests. It answers requests
//! from a queue of expectations, in order, and records every request it sees
//! so tests can assert on paths and bodies.
//!
//! ```rust,ignore
//! let mock = Arc::new(MockTransport::new());
//! mock.expect(Method::GET, "Workspace/Count").return_body(StatusCode::OK, "5");
//!
//! let client = ResourceClient::<Workspace>::new(mock.clone());
//! assert_eq!(client.count().await?, 5);
//! mock.verify(); // Ensures all expectations were met
//! ```
//!
//! | Feature | MockTransport | ReqwestTransport |
//! |---------|---------------|------------------|
//! | **Speed** | Instant (in-memory) | Network bound |
//! | **Determinism** | Fully scripted | Depends on the server |
//! | **Error Injection** | `return_err`, `delayed` | Hard |

use crate::framework::{HttpTransport, TransportError, TransportRequest, TransportResponse};
use async_trait::async_trait;
use http::{Method, StatusCode};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

struct Expectation {
    method: Method,
    path: String,
    delay: Option<Duration>,
    reply: Result<TransportResponse, TransportError>,
}

/// A scripted transport with expectation tracking.
#[derive(Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    requests: Arc<Mutex<Vec<TransportRequest>>>,
}

impl MockTransport {
    /// Creates a mock transport with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a request with this verb and path next.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            delay: None,
            expectations: Arc::clone(&self.expectations),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<TransportRequest> {
        lock(&self.requests).clone()
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        lock(&self.requests).push(request.clone());
        let expectation = lock(&self.expectations).pop_front();

        let Some(expectation) = expectation else {
            panic!("Unexpected request: {} {}", request.method, request.path);
        };
        if expectation.method != request.method || expectation.path != request.path {
            panic!(
                "Expected {} {}, got {} {}",
                expectation.method, expectation.path, request.method, request.path
            );
        }
        if let Some(delay) = expectation.delay {
            tokio::time::sleep(delay).await;
        }
        expectation.reply
    }
}

/// Builder for one expected request.
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    delay: Option<Duration>,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Holds the reply back for `delay`, e.g. to exercise cancellation.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replies with a status and no content.
    pub fn return_status(self, status: StatusCode) {
        self.push(Ok(TransportResponse::new(status)));
    }

    /// Replies with a status and raw body text.
    pub fn return_body(self, status: StatusCode, body: impl Into<String>) {
        self.push(Ok(TransportResponse::new(status).with_body(body)));
    }

    /// Replies with a status and a JSON body.
    pub fn return_json(self, status: StatusCode, body: serde_json::Value) {
        self.push(Ok(TransportResponse::new(status).with_body(body.to_string())));
    }

    /// Fails the request at the transport level.
    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, reply: Result<TransportResponse, TransportError>) {
        lock(&self.expectations).push_back(Expectation {
            method: self.method,
            path: self.path,
            delay: self.delay,
            reply,
        });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
