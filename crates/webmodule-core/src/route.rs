//! Value types describing routes, redirects, assets and menu entries.
//!
//! Everything here is an immutable descriptor. Entities never reference each
//! other; relationships are by path string only.

use std::borrow::Cow;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::AuthRequirements;
use crate::error::HttpError;
use crate::registry::Registry;
use crate::request::WebRequest;

/// HTTP methods a route can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }

    /// Parse a method name, falling back to GET for anything unknown.
    pub fn parse_or_get(method: &str) -> Self {
        method.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A method name outside GET/POST/PUT/DELETE/PATCH.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown HTTP method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "PATCH" => Ok(Method::Patch),
            other => Err(UnknownMethod(other.to_string())),
        }
    }
}

/// Result of a route handler: the response body, or an HTTP error.
pub type RouteResult = Result<String, HttpError>;

/// Route handler. Receives the request and read access to the registry so
/// it can inject navigation or stylesheet links into the pages it renders.
pub type RouteHandler = Arc<dyn Fn(&WebRequest, &Registry) -> RouteResult + Send + Sync>;

/// Content type used when a route does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// One HTTP method + path binding contributed by a module.
#[derive(Clone)]
pub struct WebRoute {
    pub path: String,
    pub method: Method,
    pub handler: RouteHandler,
    pub content_type: String,
    pub description: Option<String>,
    pub auth: AuthRequirements,
}

impl WebRoute {
    /// Create an HTML route with no description and no authentication.
    pub fn new<F>(path: impl Into<String>, method: Method, handler: F) -> Self
    where
        F: Fn(&WebRequest, &Registry) -> RouteResult + Send + Sync + 'static,
    {
        Self {
            path: path.into(),
            method,
            handler: Arc::new(handler),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            description: None,
            auth: AuthRequirements::default(),
        }
    }

    /// Shorthand for a GET route.
    pub fn get<F>(path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&WebRequest, &Registry) -> RouteResult + Send + Sync + 'static,
    {
        Self::new(path, Method::Get, handler)
    }

    /// Shorthand for a POST route.
    pub fn post<F>(path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&WebRequest, &Registry) -> RouteResult + Send + Sync + 'static,
    {
        Self::new(path, Method::Post, handler)
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_auth(mut self, auth: AuthRequirements) -> Self {
        self.auth = auth;
        self
    }

    /// Invoke the handler.
    pub fn call(&self, request: &WebRequest, registry: &Registry) -> RouteResult {
        (self.handler)(request, registry)
    }

    pub fn requires_auth(&self) -> bool {
        self.auth.requires_auth()
    }
}

impl std::fmt::Debug for WebRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebRoute")
            .field("path", &self.path)
            .field("method", &self.method)
            .field("content_type", &self.content_type)
            .field("description", &self.description)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

/// One exact-path redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectRule {
    pub from_path: String,
    /// Internal path or absolute external URL.
    pub to_path: String,
}

impl RedirectRule {
    pub fn new(from_path: impl Into<String>, to_path: impl Into<String>) -> Self {
        Self {
            from_path: from_path.into(),
            to_path: to_path.into(),
        }
    }

    /// Whether the target points off-device.
    pub fn is_external(&self) -> bool {
        is_external_target(&self.to_path)
    }
}

/// Convention used by transports to tell external redirect targets apart.
pub fn is_external_target(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

/// Where an asset's content lives on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageHint {
    /// Heap-allocated at runtime.
    #[default]
    Ram,
    /// Compiled into the read-only firmware image.
    Flash,
}

/// A pre-built response body served verbatim at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAsset {
    pub path: String,
    pub content: Cow<'static, str>,
    pub mime_type: String,
    pub storage: StorageHint,
}

impl StaticAsset {
    pub fn new(
        path: impl Into<String>,
        content: impl Into<Cow<'static, str>>,
        mime_type: impl Into<String>,
        storage: StorageHint,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            mime_type: mime_type.into(),
            storage,
        }
    }

    /// Convert into a GET route returning the content unchanged.
    pub fn to_route(&self) -> WebRoute {
        let content = self.content.clone();
        WebRoute::get(self.path.clone(), move |_, _| Ok(content.to_string()))
            .with_content_type(self.mime_type.clone())
            .with_description(format!("Static asset: {}", self.path))
    }
}

/// One navigation menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub name: String,
    pub url: String,
    /// Link target attribute, e.g. `_blank`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl NavigationItem {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            target: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}
