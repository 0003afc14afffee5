//! Access control for routes that require authentication.
//!
//! The registry only classifies routes; deciding whether a request may
//! proceed is up to the device. Gates see the request and the route's
//! requirements and either produce the caller's [`AuthContext`] or an
//! [`HttpError`] that becomes the response.

use webmodule_core::{AuthContext, AuthRequirements, AuthType, HttpError, WebRequest};

/// Decides access for routes whose requirements call for authentication.
pub trait AuthGate: Send + Sync {
    fn authorize(
        &self,
        request: &WebRequest,
        requirements: &AuthRequirements,
    ) -> Result<AuthContext, HttpError>;
}

/// Lets every request through unauthenticated.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGate;

impl AuthGate for OpenGate {
    fn authorize(
        &self,
        _request: &WebRequest,
        _requirements: &AuthRequirements,
    ) -> Result<AuthContext, HttpError> {
        Ok(AuthContext::anonymous())
    }
}

/// Accepts a single pre-shared bearer token on `TOKEN` routes.
#[derive(Debug, Clone)]
pub struct BearerTokenGate {
    token: String,
}

impl BearerTokenGate {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl AuthGate for BearerTokenGate {
    fn authorize(
        &self,
        request: &WebRequest,
        requirements: &AuthRequirements,
    ) -> Result<AuthContext, HttpError> {
        if !requirements.has(AuthType::Token) {
            return Err(HttpError::unauthorized(
                "This resource requires a login session.",
            ));
        }

        let presented = request
            .header("authorization")
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim);
        match presented {
            Some(token) if token == self.token => {
                Ok(AuthContext::authenticated(AuthType::Token, None))
            }
            Some(_) => Err(HttpError::unauthorized("Invalid token.")),
            None => Err(HttpError::unauthorized(
                "Authentication is required to access this resource.",
            )),
        }
    }
}
