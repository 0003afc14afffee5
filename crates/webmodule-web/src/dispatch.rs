//! The per-request pipeline.
//!
//! Order of precedence for a request path:
//! 1. Redirect rules (`302 Found`)
//! 2. Static assets (GET only)
//! 3. Mounted routes, then the registry's built-in stylesheet routes
//! 4. Error page: 405 when the path exists with another method, 404
//!    otherwise, or the status a handler returned
//!
//! Dispatch is synchronous and takes the state mutably, so one request
//! cycle (current path, handler, navigation injection) never interleaves
//! with another.

use tracing::{debug, info, warn};

use webmodule_core::route::DEFAULT_CONTENT_TYPE;
use webmodule_core::{HttpError, Method, Resolution, WebRequest, WebRoute};

use crate::ServerState;

/// What the transport should send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Redirect {
        location: String,
        external: bool,
    },
    Content {
        status: u16,
        content_type: String,
        body: String,
    },
}

impl Reply {
    pub fn status(&self) -> u16 {
        match self {
            Reply::Redirect { .. } => 302,
            Reply::Content { status, .. } => *status,
        }
    }
}

/// Run one request through the pipeline.
pub fn dispatch(state: &mut ServerState, mut request: WebRequest) -> Reply {
    state.statistics.record_request();
    state.registry.set_current_path(request.path());

    match state.registry.resolve(request.path()) {
        Resolution::Redirect { target, external } => {
            info!(to = target, external, "Redirect");
            state.statistics.record_redirect();
            return Reply::Redirect {
                location: target.to_string(),
                external,
            };
        }
        Resolution::Asset(asset) if request.method() == Method::Get => {
            debug!(mime = %asset.mime_type, bytes = asset.content.len(), "Static asset");
            state.statistics.record_asset();
            return Reply::Content {
                status: 200,
                content_type: asset.mime_type.clone(),
                body: asset.content.to_string(),
            };
        }
        Resolution::Asset(_) | Resolution::Unmatched => {}
    }

    let builtin = state.registry.builtin_routes();
    let candidates = || {
        state
            .routes
            .iter()
            .map(|mounted| &mounted.route)
            .chain(builtin.iter())
    };

    let Some(route) = candidates()
        .find(|route| route.path == request.path() && route.method == request.method())
    else {
        let known_path = state.registry.has_static_asset(request.path())
            || candidates().any(|route| route.path == request.path());
        let error = if known_path {
            HttpError::method_not_allowed("")
        } else {
            HttpError::not_found("")
        };
        debug!(status = error.status, "No route");
        return error_reply(state, &error);
    };

    if route.requires_auth() {
        match state.auth_gate.authorize(&request, &route.auth) {
            Ok(context) => request.set_auth(context),
            Err(error) => {
                warn!(status = error.status, "Access denied");
                return error_reply(state, &error);
            }
        }
    }

    match call_route(route, &request, state) {
        Ok(reply) => {
            state.statistics.record_route();
            reply
        }
        Err(error) => {
            warn!(status = error.status, message = %error.message, "Handler failed");
            error_reply(state, &error)
        }
    }
}

fn call_route(
    route: &WebRoute,
    request: &WebRequest,
    state: &ServerState,
) -> Result<Reply, HttpError> {
    let body = route.call(request, &state.registry)?;
    Ok(Reply::Content {
        status: 200,
        content_type: route.content_type.clone(),
        body,
    })
}

/// Render the error page for `error` at the current path.
pub fn error_reply(state: &ServerState, error: &HttpError) -> Reply {
    state.statistics.record_error();
    Reply::Content {
        status: error.status,
        content_type: DEFAULT_CONTENT_TYPE.to_string(),
        body: state
            .registry
            .render_error_page(error.status, &error.message),
    }
}

/// Error reply for a request that never made it into a [`WebRequest`].
pub fn reject(state: &mut ServerState, path: &str, error: &HttpError) -> Reply {
    state.statistics.record_request();
    state.registry.set_current_path(path);
    error_reply(state, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::BearerTokenGate;
    use pretty_assertions::assert_eq;
    use webmodule_core::{
        AuthRequirements, NavigationItem, Registry, StorageHint, WebModule,
    };

    struct Main;

    impl WebModule for Main {
        fn name(&self) -> &str {
            "main"
        }

        fn http_routes(&self) -> Vec<WebRoute> {
            vec![
                WebRoute::get("/", |_, registry| {
                    let page = r#"<html><head></head><body><div class="container"><h1>Main</h1></div></body></html>"#;
                    let page = registry.inject_stylesheet_link(page);
                    Ok(registry.inject_navigation_menu(&page))
                }),
                WebRoute::post("/echo", |request, _| {
                    Ok(request.param("value").unwrap_or_default().to_string())
                }),
                WebRoute::get("/missing", |_, _| Err(HttpError::not_found("User not found"))),
                WebRoute::get("/teapot", |_, _| {
                    Err(HttpError::new(418, "No coffee here."))
                }),
                WebRoute::get("/private", |request, _| {
                    Ok(format!("authenticated={}", request.auth().authenticated))
                })
                .with_auth(AuthRequirements::token_only()),
            ]
        }
    }

    fn state() -> ServerState {
        let mut registry = Registry::new();
        registry.add_redirect("/", "/main/");
        registry.add_redirect("/old", "/main/");
        registry.add_redirect("/docs", "https://example.com/docs");
        registry.add_javascript("/assets/app.js", "init();", StorageHint::Flash);
        registry.set_navigation_menu(vec![
            NavigationItem::new("Home", "/main/"),
            NavigationItem::new("Settings", "/settings/"),
        ]);

        let mut state = ServerState::new(registry);
        state.mount("/main", &Main);
        state
    }

    fn body(reply: Reply) -> String {
        match reply {
            Reply::Content { body, .. } => body,
            other => panic!("expected content, got {:?}", other),
        }
    }

    #[test]
    fn test_redirects() {
        let mut state = state();
        assert_eq!(
            dispatch(&mut state, WebRequest::new(Method::Get, "/old")),
            Reply::Redirect {
                location: "/main/".to_string(),
                external: false
            }
        );
        assert_eq!(
            dispatch(&mut state, WebRequest::new(Method::Post, "/docs")),
            Reply::Redirect {
                location: "https://example.com/docs".to_string(),
                external: true
            }
        );
    }

    #[test]
    fn test_empty_redirect_target_serves_route() {
        let mut state = state();
        state.registry.add_redirect("/main/", "");
        let reply = dispatch(&mut state, WebRequest::new(Method::Get, "/main/"));
        assert_eq!(reply.status(), 200);
        assert!(body(reply).contains("<h1>Main</h1>"));
        assert_eq!(state.statistics().snapshot().redirects, 0);
    }

    #[test]
    fn test_module_page_gets_menu_and_stylesheet() {
        let mut state = state();
        let reply = dispatch(&mut state, WebRequest::new(Method::Get, "/main/"));
        assert_eq!(reply.status(), 200);
        let page = body(reply);
        assert!(page.contains(r#"<link rel="stylesheet" href="/assets/style.css">"#));
        assert!(page.contains(r#"<a href="/main/" class="active">Home</a>"#));
    }

    #[test]
    fn test_static_asset() {
        let mut state = state();
        let reply = dispatch(&mut state, WebRequest::new(Method::Get, "/assets/app.js"));
        assert_eq!(
            reply,
            Reply::Content {
                status: 200,
                content_type: "application/javascript".to_string(),
                body: "init();".to_string()
            }
        );

        let reply = dispatch(&mut state, WebRequest::new(Method::Post, "/assets/app.js"));
        assert_eq!(reply.status(), 405);
    }

    #[test]
    fn test_builtin_stylesheet() {
        let mut state = state();
        state.registry.set_theme("base", "overlay");
        let reply = dispatch(&mut state, WebRequest::new(Method::Get, "/assets/style.css"));
        assert_eq!(
            reply,
            Reply::Content {
                status: 200,
                content_type: "text/css".to_string(),
                body: "base\noverlay".to_string()
            }
        );
        let reply = dispatch(&mut state, WebRequest::new(Method::Get, "/assets/theme.css"));
        assert_eq!(body(reply), "overlay");
    }

    #[test]
    fn test_not_found_page_marks_current_section() {
        let mut state = state();
        let reply = dispatch(&mut state, WebRequest::new(Method::Get, "/settings/nope"));
        assert_eq!(reply.status(), 404);
        let page = body(reply);
        assert!(page.contains("404 Page Not Found"));
        assert!(page.contains(r#"<a href="/settings/" class="active">Settings</a>"#));
    }

    #[test]
    fn test_method_not_allowed() {
        let mut state = state();
        let reply = dispatch(&mut state, WebRequest::new(Method::Get, "/main/echo"));
        assert_eq!(reply.status(), 405);
        assert!(body(reply).contains("405 Method Not Allowed"));
    }

    #[test]
    fn test_handler_error_status_and_message() {
        let mut state = state();
        let reply = dispatch(&mut state, WebRequest::new(Method::Get, "/main/missing"));
        assert_eq!(reply.status(), 404);
        assert!(body(reply).contains("User not found"));

        let reply = dispatch(&mut state, WebRequest::new(Method::Get, "/main/teapot"));
        assert_eq!(reply.status(), 418);
        let page = body(reply);
        assert!(page.contains("418 Error"));
        assert!(page.contains("No coffee here."));
    }

    #[test]
    fn test_custom_error_page_override() {
        let mut state = state();
        state.registry.set_error_page(404, "<html><body>Lost</body></html>");
        let page = body(dispatch(&mut state, WebRequest::new(Method::Get, "/x")));
        assert!(page.starts_with("<html><body>\n<div class=\"nav-links\">"));
        assert!(page.ends_with("Lost</body></html>"));
    }

    #[test]
    fn test_form_params_reach_handler() {
        let mut state = state();
        let mut request = WebRequest::new(Method::Post, "/main/echo")
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_body("value=hello+world");
        request.merge_form_params();
        assert_eq!(body(dispatch(&mut state, request)), "hello world");
    }

    #[test]
    fn test_open_gate_admits_protected_route() {
        let mut state = state();
        let reply = dispatch(&mut state, WebRequest::new(Method::Get, "/main/private"));
        assert_eq!(body(reply), "authenticated=false");
    }

    #[test]
    fn test_gate_denial_renders_401() {
        let mut state = state().with_auth_gate(BearerTokenGate::new("t0ken"));
        let reply = dispatch(&mut state, WebRequest::new(Method::Get, "/main/private"));
        assert_eq!(reply.status(), 401);
        assert!(body(reply).contains("401 Unauthorized"));

        let request = WebRequest::new(Method::Get, "/main/private")
            .with_header("Authorization", "Bearer t0ken");
        assert_eq!(body(dispatch(&mut state, request)), "authenticated=true");
    }

    #[test]
    fn test_statistics() {
        let mut state = state();
        dispatch(&mut state, WebRequest::new(Method::Get, "/old"));
        dispatch(&mut state, WebRequest::new(Method::Get, "/assets/app.js"));
        dispatch(&mut state, WebRequest::new(Method::Get, "/main/"));
        dispatch(&mut state, WebRequest::new(Method::Get, "/nowhere"));

        let snapshot = state.statistics().snapshot();
        assert_eq!(snapshot.requests, 4);
        assert_eq!(snapshot.redirects, 1);
        assert_eq!(snapshot.assets_served, 1);
        assert_eq!(snapshot.routes_handled, 1);
        assert_eq!(snapshot.errors, 1);
    }

    #[test]
    fn test_reject() {
        let mut state = state();
        let reply = reject(
            &mut state,
            "/main/",
            &HttpError::method_not_allowed("Unsupported method"),
        );
        assert_eq!(reply.status(), 405);
        assert!(body(reply).contains("Unsupported method"));
    }
}
