//! Transport collaborator boundary.
//!
//! The core never performs I/O itself: every network exchange goes through
//! a caller-supplied [`Transport`] that takes a fully described request and
//! returns the response JSON. Retries, timeouts, and cancellation are the
//! transport's concern; the core must only ever see complete responses.

use serde_json::Value;
use skysync_protocol::HttpMethod;
use thiserror::Error;

/// Header values impersonating the game's Unity HTTP stack; the servers
/// reject unfamiliar user agents.
pub const UNITY_VERSION: &str = "2020.3.0f1";
pub const USER_AGENT: &str = "UnityPlayer/2020.3.0f1 (UnityWebRequest/1.0, libcurl/7.52.0-DEV)";

/// Headers included in every request.
pub fn default_headers() -> Vec<(String, String)> {
    vec![
        ("X-Unity-Version".to_string(), UNITY_VERSION.to_string()),
        ("User-Agent".to_string(), USER_AGENT.to_string()),
    ]
}

/// A fully described request, ready for an HTTP client to execute. Query
/// parameters are passed unencoded; URL encoding is the transport's job.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// Form fields for POST requests.
    pub form: Option<Value>,
}

impl TransportRequest {
    /// A GET with default headers.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            query: Vec::new(),
            headers: default_headers(),
            form: None,
        }
    }

    /// A POST with default headers and a form body.
    pub fn post(url: impl Into<String>, form: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            query: Vec::new(),
            headers: default_headers(),
            form: Some(form),
        }
    }
}

/// Failure inside the transport collaborator, before a response arrived.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// The external request/response collaborator.
pub trait Transport {
    /// Execute the request and return the response body as JSON.
    fn execute(&self, request: TransportRequest) -> Result<Value, TransportError>;
}

/// Forwarding impls so a shared or boxed transport satisfies the bound. The
/// orphan rules only allow these smart-pointer wrappers to be written in the
/// crate that defines `Transport`; callers that hold a transport behind `Rc`,
/// `Arc`, `Box`, or a reference rely on them.
impl<T: Transport + ?Sized> Transport for std::rc::Rc<T> {
    fn execute(&self, request: TransportRequest) -> Result<Value, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn execute(&self, request: TransportRequest) -> Result<Value, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: TransportRequest) -> Result<Value, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: TransportRequest) -> Result<Value, TransportError> {
        (**self).execute(request)
    }
}
