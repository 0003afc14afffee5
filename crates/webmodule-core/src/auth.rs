//! Authentication requirements attached to routes.
//!
//! A route carries a list of accepted authentication types. The list is
//! purely declarative: the registry never authenticates anyone, it only
//! answers whether a route asks for authentication at all. Deciding whether
//! a request satisfies the requirement is the transport's job.

use serde::{Deserialize, Serialize};

/// A single accepted authentication mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthType {
    /// No authentication.
    #[default]
    None,
    /// Browser session cookie.
    Session,
    /// Bearer token (API clients).
    Token,
    /// Only reachable from the local network.
    LocalOnly,
}

impl AuthType {
    /// Upper-case name used in logs and manifests.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::None => "NONE",
            AuthType::Session => "SESSION",
            AuthType::Token => "TOKEN",
            AuthType::LocalOnly => "LOCAL_ONLY",
        }
    }
}

impl std::fmt::Display for AuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of authentication types a route accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthRequirements(Vec<AuthType>);

impl AuthRequirements {
    /// Build requirements from an explicit list.
    pub fn new(types: impl Into<Vec<AuthType>>) -> Self {
        Self(types.into())
    }

    /// Public route.
    pub fn none() -> Self {
        Self(vec![AuthType::None])
    }

    pub fn session_only() -> Self {
        Self(vec![AuthType::Session])
    }

    pub fn token_only() -> Self {
        Self(vec![AuthType::Token])
    }

    pub fn session_or_token() -> Self {
        Self(vec![AuthType::Session, AuthType::Token])
    }

    /// Check whether a given type is accepted.
    pub fn has(&self, auth_type: AuthType) -> bool {
        self.0.contains(&auth_type)
    }

    /// Whether the route requires any authentication.
    ///
    /// An empty list, or a list holding exactly `NONE`, means public. Any
    /// other combination requires authentication, including `NONE` mixed
    /// with another type.
    pub fn requires_auth(&self) -> bool {
        match self.0.as_slice() {
            [] => false,
            [AuthType::None] => false,
            _ => true,
        }
    }

    /// The accepted types in declaration order.
    pub fn types(&self) -> &[AuthType] {
        &self.0
    }
}

impl From<Vec<AuthType>> for AuthRequirements {
    fn from(types: Vec<AuthType>) -> Self {
        Self(types)
    }
}

/// Authentication state attached to a request by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    /// Whether the request was authenticated.
    pub authenticated: bool,
    /// The mechanism that authenticated it.
    pub auth_type: AuthType,
    /// Authenticated user, if any.
    pub username: Option<String>,
}

impl AuthContext {
    /// Context for an unauthenticated request.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for a request authenticated by `auth_type`.
    pub fn authenticated(auth_type: AuthType, username: Option<String>) -> Self {
        Self {
            authenticated: true,
            auth_type,
            username,
        }
    }
}
