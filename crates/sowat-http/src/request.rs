//! Immutable request descriptors.
//!
//! An [`ApiRequest`] is built once and may be dispatched twice (initial
//! attempt and replay after a refresh). Nothing about it changes between the
//! two; the attempt number travels separately as an [`Attempt`].

use std::fmt;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;

use sowat_core::Result;
use sowat_core::error::InvalidInputError;

/// Which dispatch of a request this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// First dispatch. A 401 here may trigger a refresh.
    Initial,
    /// Resubmission after a refresh. Its outcome is final.
    Replay,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attempt::Initial => f.write_str("initial"),
            Attempt::Replay => f.write_str("replay"),
        }
    }
}

/// Per-call overrides.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Raise a notification when the request fails.
    pub notify_errors: bool,
    /// Run the refresh-and-replay protocol on 401.
    pub recover_auth: bool,
    /// Timeout for this call only.
    pub timeout: Option<Duration>,
    /// Extra headers.
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            notify_errors: true,
            recover_auth: true,
            timeout: None,
            headers: Vec::new(),
        }
    }
}

/// A request against the admin API.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    options: RequestOptions,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            options: RequestOptions::default(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach query parameters from any struct that serializes to a flat
    /// object. `null` fields are skipped and sequences repeat the key.
    pub fn with_query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self> {
        self.query.extend(query_pairs(serde_json::to_value(params)?)?);
        Ok(self)
    }

    /// Attach a JSON body.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Do not raise notifications; the caller renders its own errors.
    pub fn quiet(mut self) -> Self {
        self.options.notify_errors = false;
        self
    }

    /// Surface a 401 as-is instead of refreshing the session.
    pub fn without_auth_recovery(mut self) -> Self {
        self.options.recover_auth = false;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }
}

fn query_pairs(value: serde_json::Value) -> Result<Vec<(String, String)>> {
    use serde_json::Value;

    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(InvalidInputError::Query {
                reason: format!("expected an object, got {}", other),
            }
            .into());
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    pairs.push((key.clone(), scalar(&key, item)?));
                }
            }
            other => pairs.push((key.clone(), scalar(&key, other)?)),
        }
    }
    Ok(pairs)
}

fn scalar(key: &str, value: serde_json::Value) -> Result<String> {
    use serde_json::Value;

    match value {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(InvalidInputError::Query {
            reason: format!("parameter '{}' is not a scalar", key),
        }
        .into()),
    }
}
