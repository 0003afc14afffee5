//! Transport-independent request abstraction.
//!
//! Transports (axum on Linux, esp-idf on the device) translate their native
//! request into a [`WebRequest`] so module handlers never see the server
//! internals.

use std::collections::BTreeMap;

use crate::auth::AuthContext;
use crate::route::Method;

/// Query-string and form parameters, ordered by key.
pub type Params = BTreeMap<String, String>;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A request as seen by route handlers.
#[derive(Debug, Clone, Default)]
pub struct WebRequest {
    path: String,
    method: Method,
    body: String,
    params: Params,
    /// Keys are stored lower-case.
    headers: BTreeMap<String, String>,
    auth: AuthContext,
}

impl WebRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            ..Default::default()
        }
    }

    /// Add parameters parsed from a raw query string (without the `?`).
    pub fn with_query(mut self, query: &str) -> Self {
        self.params.extend(parse_query(query));
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_auth(mut self, auth: AuthContext) -> Self {
        self.auth = auth;
        self
    }

    /// Parse a form-encoded body into the parameters.
    ///
    /// Does nothing unless the `Content-Type` header says the body is
    /// `application/x-www-form-urlencoded`.
    pub fn merge_form_params(&mut self) {
        if self.content_type().contains(FORM_CONTENT_TYPE) {
            let form = parse_query(&self.body);
            self.params.extend(form);
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(&name.to_ascii_lowercase())
    }

    /// Rebuild a query string from the parameters, in key order.
    pub fn query_string(&self) -> String {
        serde_urlencoded::to_string(&self.params).unwrap_or_default()
    }

    /// `Content-Type` header, or empty.
    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or_default()
    }

    /// `Content-Length` header, or 0 when absent or invalid.
    pub fn content_length(&self) -> usize {
        self.header("content-length")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn set_auth(&mut self, auth: AuthContext) {
        self.auth = auth;
    }
}

/// Parse `a=1&b=two+words` into parameters.
///
/// Pairs without `=` or with an empty key are skipped. Keys and values are
/// form-urlencoded. Later duplicates overwrite earlier ones.
pub fn parse_query(query: &str) -> Params {
    let pairs = query
        .split('&')
        .filter(|pair| pair.contains('='))
        .collect::<Vec<_>>()
        .join("&");
    serde_urlencoded::from_str::<Vec<(String, String)>>(&pairs)
        .unwrap_or_default()
        .into_iter()
        .filter(|(key, _)| !key.is_empty())
        .collect()
}
