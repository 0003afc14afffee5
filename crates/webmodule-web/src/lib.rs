//! # webmodule-web
//!
//! Axum transport for a webmodule registry.
//!
//! This crate provides:
//! - Module mounting under base paths
//! - The per-request pipeline: redirect, static asset, route, error page
//! - Pluggable access control for routes that require authentication
//! - Dispatch statistics
//!
//! ## Usage
//!
//! ```rust,ignore
//! use webmodule_core::Registry;
//! use webmodule_web::{create_router, ServerState};
//!
//! let mut state = ServerState::new(Registry::new());
//! state.mount("/main", &MainModule);
//! let app = create_router(state.into_shared());
//!
//! let listener = TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod dispatch;
pub mod mount;
pub mod routes;
pub mod statistics;

// Re-exports
pub use auth::{AuthGate, BearerTokenGate, OpenGate};
pub use dispatch::{dispatch, Reply};
pub use routes::create_router;
pub use statistics::{DispatchStatistics, StatisticsSnapshot};

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use webmodule_core::{Registry, WebModule, WebRoute};

use crate::mount::join_path;

/// A route together with the module that contributed it.
#[derive(Debug, Clone)]
pub struct MountedRoute {
    pub module: String,
    pub route: WebRoute,
}

/// Everything the request pipeline needs.
///
/// Shared between handlers as [`AppState`].
pub struct ServerState {
    pub registry: Registry,
    routes: Vec<MountedRoute>,
    secure: bool,
    auth_gate: Box<dyn AuthGate>,
    statistics: Arc<DispatchStatistics>,
}

impl ServerState {
    /// Plain HTTP state with an open auth gate.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            routes: Vec::new(),
            secure: false,
            auth_gate: Box::new(OpenGate),
            statistics: Arc::new(DispatchStatistics::new()),
        }
    }

    /// Serve the modules' HTTPS route sets instead of the HTTP ones.
    ///
    /// Affects modules mounted afterwards.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_auth_gate(mut self, gate: impl AuthGate + 'static) -> Self {
        self.auth_gate = Box::new(gate);
        self
    }

    /// Run the module's setup and mount its routes under `base_path`.
    pub fn mount(&mut self, base_path: &str, module: &dyn WebModule) {
        module.setup(&mut self.registry);

        let routes = module.routes(self.secure);
        info!(
            module = module.name(),
            version = module.version(),
            base = base_path,
            routes = routes.len(),
            "Module mounted"
        );
        for mut route in routes {
            route.path = join_path(base_path, &route.path);
            debug!(method = %route.method, path = %route.path, "Route registered");
            self.routes.push(MountedRoute {
                module: module.name().to_string(),
                route,
            });
        }
    }

    /// Mount a single route outside any module.
    pub fn mount_route(&mut self, route: WebRoute) {
        debug!(method = %route.method, path = %route.path, "Route registered");
        self.routes.push(MountedRoute {
            module: String::new(),
            route,
        });
    }

    pub fn routes(&self) -> &[MountedRoute] {
        &self.routes
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn auth_gate(&self) -> &dyn AuthGate {
        self.auth_gate.as_ref()
    }

    pub fn statistics(&self) -> Arc<DispatchStatistics> {
        Arc::clone(&self.statistics)
    }

    /// Wrap for sharing between handlers.
    pub fn into_shared(self) -> AppState {
        Arc::new(RwLock::new(self))
    }
}

/// Type alias for shared state in Axum handlers.
pub type AppState = Arc<RwLock<ServerState>>;
