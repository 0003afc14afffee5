//! Feature module interface.
//!
//! Each device feature (status page, settings, OTA, ...) implements
//! [`WebModule`] and hands its routes to the transport. Modules never own
//! registry state; they contribute redirects and assets through
//! [`WebModule::setup`] before serving starts.

use crate::registry::Registry;
use crate::route::WebRoute;

/// A device feature exposing HTTP routes.
pub trait WebModule: Send + Sync {
    /// Unique module name.
    fn name(&self) -> &str;

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn description(&self) -> &str {
        "Web-enabled module"
    }

    /// Routes served over plain HTTP.
    fn http_routes(&self) -> Vec<WebRoute>;

    /// Routes served over HTTPS. Same as HTTP unless overridden.
    fn https_routes(&self) -> Vec<WebRoute> {
        self.http_routes()
    }

    /// Routes for the given transport.
    fn routes(&self, secure: bool) -> Vec<WebRoute> {
        if secure {
            self.https_routes()
        } else {
            self.http_routes()
        }
    }

    /// Register redirects, assets or error pages at start-up.
    fn setup(&self, _registry: &mut Registry) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::StorageHint;

    struct Status;

    impl WebModule for Status {
        fn name(&self) -> &str {
            "status"
        }

        fn http_routes(&self) -> Vec<WebRoute> {
            vec![WebRoute::get("/", |_, _| Ok("<h1>Status</h1>".to_string()))]
        }
    }

    struct Secure;

    impl WebModule for Secure {
        fn name(&self) -> &str {
            "secure"
        }

        fn version(&self) -> &str {
            "2.1.0"
        }

        fn http_routes(&self) -> Vec<WebRoute> {
            vec![WebRoute::get("/", |_, _| Ok("plain".to_string()))]
        }

        fn https_routes(&self) -> Vec<WebRoute> {
            vec![
                WebRoute::get("/", |_, _| Ok("secure".to_string())),
                WebRoute::post("/keys", |_, _| Ok("ok".to_string())),
            ]
        }

        fn setup(&self, registry: &mut Registry) {
            registry.add_javascript("/assets/secure.js", "lock();", StorageHint::Flash);
        }
    }

    #[test]
    fn test_defaults() {
        let module = Status;
        assert_eq!(module.version(), "1.0.0");
        assert_eq!(module.description(), "Web-enabled module");
        assert_eq!(module.https_routes().len(), 1);
        assert_eq!(module.routes(true).len(), module.routes(false).len());
    }

    #[test]
    fn test_routes_by_transport() {
        let module = Secure;
        assert_eq!(module.version(), "2.1.0");
        assert_eq!(module.routes(false).len(), 1);
        assert_eq!(module.routes(true).len(), 2);
    }

    #[test]
    fn test_setup_contributes_assets() {
        let mut registry = Registry::new();
        Status.setup(&mut registry);
        assert!(registry.static_assets().is_empty());

        Secure.setup(&mut registry);
        assert!(registry.has_static_asset("/assets/secure.js"));
    }
}
