//! Demo device: three feature modules and the registry setup they share.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use serde::Serialize;
use webmodule_core::{
    AuthRequirements, HttpError, NavigationItem, Registry, StorageHint, WebModule, WebRoute,
};

const DARK_OVERLAY: &str = r#":root {
  --primary-color: #e94560;
  --secondary-color: #0f3460;
  --bg-color: #1a1a2e;
  --card-bg: #16213e;
  --text-color: #eaeaea;
  --text-muted: #a0a0b0;
  --border-color: rgba(233, 69, 96, 0.3);
  --shadow-color: rgba(233, 69, 96, 0.3);
}"#;

const CUSTOM_404: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>404 - Page Not Found</title>
  <link rel="stylesheet" href="/assets/style.css">
</head>
<body>
  <div class="container">
    <!-- Navigation menu will be auto-injected here -->
    <div class="error-page">
      <h1 class="error">404 - Not Found</h1>
      <p class="error-description">
        We couldn't find what you were looking for. Maybe it was never here?
      </p>
      <div class="error-actions button-group">
        <a href="/" class="btn btn-primary">Home</a>
        <a href="javascript:history.back()" class="btn btn-secondary">Go Back</a>
      </div>
    </div>
  </div>
</body>
</html>
"#;

const EXAMPLE_JS: &str = r#"document.addEventListener('DOMContentLoaded', () => {
  const status = document.getElementById('device-status');
  const refresh = async () => {
    const response = await fetch('/api/status');
    const data = await response.json();
    status.textContent = `uptime ${data.uptime}s, LED ${data.led ? 'on' : 'off'}`;
  };
  document.getElementById('toggle-led').addEventListener('click', async () => {
    await fetch('/api/led/toggle', { method: 'POST' });
    refresh();
  });
  refresh();
  setInterval(refresh, 10000);
});
"#;

const EXAMPLE_CSS: &str = r#".status-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
  gap: 15px;
}
"#;

/// 1x1 transparent PNG, base64.
const EXAMPLE_LOGO: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChAGAWA0ddwAAAABJRU5ErkJggg==";

const EXAMPLE_CONFIG: &str = r#"{"module":"example","version":"1.0.0","features":["status","led"]}"#;

/// Built-in configuration used when no config file is given.
pub fn configure_registry(registry: &mut Registry) {
    registry.add_redirect("/", "/main/");
    registry.add_redirect("/home", "/main/");
    registry.add_redirect("/config", "/settings/");
    registry.add_redirect("/docs", "https://github.com/your-org/webmodule-rs");

    registry.set_navigation_menu(vec![
        NavigationItem::new("Home", "/main/"),
        NavigationItem::new("Settings", "/settings/"),
        NavigationItem::new("Device", "/device"),
        NavigationItem::new("Error Test", "/error-test"),
        NavigationItem::new("Docs", "/docs").with_target("_blank"),
    ]);

    registry.initialize_base_theme();
    registry.add_custom_css(DARK_OVERLAY);
    registry.set_error_page(404, CUSTOM_404);
}

fn page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>{title}</title>
</head>
<body>
  <div class="container">
    <!-- Navigation menu will be auto-injected here -->
    <h1>{title}</h1>
{content}
  </div>
</body>
</html>
"#
    )
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn render(registry: &Registry, title: &str, content: &str) -> String {
    let html = registry.inject_stylesheet_link(&page(title, content));
    registry.inject_navigation_menu(&html)
}

/// Landing page.
pub struct MainModule;

impl WebModule for MainModule {
    fn name(&self) -> &str {
        "main"
    }

    fn description(&self) -> &str {
        "Device landing page"
    }

    fn http_routes(&self) -> Vec<WebRoute> {
        vec![WebRoute::get("/", |_, registry| {
            Ok(render(
                registry,
                "Device Home",
                r#"    <p class="info">Everything is running.</p>"#,
            ))
        })
        .with_description("Landing page")]
    }
}

/// Device name setting.
pub struct SettingsModule {
    device_name: Arc<RwLock<String>>,
}

impl SettingsModule {
    pub fn new(device_name: impl Into<String>) -> Self {
        Self {
            device_name: Arc::new(RwLock::new(device_name.into())),
        }
    }
}

impl WebModule for SettingsModule {
    fn name(&self) -> &str {
        "settings"
    }

    fn description(&self) -> &str {
        "Device settings"
    }

    fn http_routes(&self) -> Vec<WebRoute> {
        let name = Arc::clone(&self.device_name);
        let form = WebRoute::get("/", move |_, registry| {
            let current = escape_html(
                &name
                    .read()
                    .map_err(|_| HttpError::internal("Settings unavailable"))?,
            );
            let content = format!(
                r#"    <form method="post" action="/settings/save">
      <label>Device name <input name="deviceName" value="{current}"></label>
      <div class="button-group"><button class="btn btn-primary">Save</button></div>
    </form>"#
            );
            Ok(render(registry, "Settings", &content))
        });

        let name = Arc::clone(&self.device_name);
        let save = WebRoute::post("/save", move |request, registry| {
            let new_name = request
                .param("deviceName")
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| HttpError::bad_request("Device name must not be empty."))?;
            *name
                .write()
                .map_err(|_| HttpError::internal("Settings unavailable"))? = new_name.to_string();
            tracing::info!(device_name = new_name, "Device name changed");
            let new_name = escape_html(new_name);
            let content = format!(
                r#"    <div class="status-message success">Saved device name "{new_name}".</div>"#
            );
            Ok(render(registry, "Settings", &content))
        })
        .with_auth(AuthRequirements::session_or_token());

        vec![form, save]
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceStatus {
    uptime: u64,
    led: bool,
    timestamp: String,
}

/// Status API, LED control, static assets and error page tests.
pub struct ExampleModule {
    started: Instant,
    led: Arc<AtomicBool>,
}

impl ExampleModule {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            led: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Default for ExampleModule {
    fn default() -> Self {
        Self::new()
    }
}

impl WebModule for ExampleModule {
    fn name(&self) -> &str {
        "example"
    }

    fn version(&self) -> &str {
        "1.2.0"
    }

    fn description(&self) -> &str {
        "Status API, LED control and static asset demo"
    }

    fn setup(&self, registry: &mut Registry) {
        registry.add_javascript("/assets/example.js", EXAMPLE_JS, StorageHint::Flash);
        registry.add_static_asset("/assets/example.css", EXAMPLE_CSS, "text/css", StorageHint::Flash);
        registry.add_image("/assets/example-logo.png", EXAMPLE_LOGO, "png", StorageHint::Flash);
        registry.add_static_asset(
            "/assets/example-config.json",
            EXAMPLE_CONFIG,
            "application/json",
            StorageHint::Ram,
        );
    }

    fn http_routes(&self) -> Vec<WebRoute> {
        let device = WebRoute::get("/device", |_, registry| {
            Ok(render(
                registry,
                "Device",
                r#"    <link rel="stylesheet" href="/assets/example.css">
    <div id="device-status" class="status-grid">Loading...</div>
    <button id="toggle-led" class="btn btn-primary">Toggle LED</button>
    <script src="/assets/example.js"></script>"#,
            ))
        });

        let started = self.started;
        let led = Arc::clone(&self.led);
        let status = WebRoute::get("/api/status", move |_, _| {
            let status = DeviceStatus {
                uptime: started.elapsed().as_secs(),
                led: led.load(Ordering::Relaxed),
                timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            };
            serde_json::to_string(&status).map_err(|e| HttpError::internal(e.to_string()))
        })
        .with_content_type("application/json")
        .with_description("Device status");

        let led = Arc::clone(&self.led);
        let toggle = WebRoute::post("/api/led/toggle", move |_, _| {
            let on = !led.fetch_xor(true, Ordering::Relaxed);
            let message = if on { "LED on" } else { "LED off" };
            tracing::info!(on, "LED toggled");
            Ok(serde_json::json!({ "led": on, "message": message }).to_string())
        })
        .with_content_type("application/json")
        .with_description("Toggle the status LED");

        let error_test = WebRoute::get("/error-test", |request, registry| {
            match request.param("error") {
                Some("404") => Err(HttpError::status(404)),
                Some("500") => Err(HttpError::status(500)),
                Some("401") => Err(HttpError::status(401)),
                Some("custom") => Err(HttpError::new(
                    418,
                    "I'm a teapot! This server refuses to brew coffee.",
                )),
                _ => Ok(render(
                    registry,
                    "Error Page Testing",
                    r#"    <div class="button-group">
      <a href="/error-test?error=404" class="btn btn-secondary">Test 404 (Custom)</a>
      <a href="/error-test?error=500" class="btn btn-secondary">Test 500 (Default)</a>
      <a href="/error-test?error=401" class="btn btn-secondary">Test 401 (Default)</a>
      <a href="/error-test?error=custom" class="btn btn-secondary">Test 418 (Teapot)</a>
      <a href="/this-page-does-not-exist" class="btn btn-secondary">Natural 404 Error</a>
    </div>"#,
                )),
            }
        });

        vec![device, status, toggle, error_test]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webmodule_core::{Method, WebRequest};

    #[test]
    fn test_demo_registry() {
        let mut registry = Registry::new();
        configure_registry(&mut registry);
        assert_eq!(registry.redirect_target("/"), Some("/main/"));
        assert!(registry.css().is_themed());
        assert!(registry.effective_css().ends_with(DARK_OVERLAY));
        assert_eq!(registry.error_page(404), CUSTOM_404);
    }

    #[test]
    fn test_led_toggle() {
        let module = ExampleModule::new();
        let registry = Registry::new();
        let routes = module.http_routes();
        let toggle = routes.iter().find(|r| r.path == "/api/led/toggle").unwrap();
        let request = WebRequest::new(Method::Post, "/api/led/toggle");

        let first: serde_json::Value =
            serde_json::from_str(&toggle.call(&request, &registry).unwrap()).unwrap();
        assert_eq!(first["led"], true);
        let second: serde_json::Value =
            serde_json::from_str(&toggle.call(&request, &registry).unwrap()).unwrap();
        assert_eq!(second["led"], false);
    }

    #[test]
    fn test_error_test_route() {
        let module = ExampleModule::new();
        let registry = Registry::new();
        let routes = module.http_routes();
        let route = routes.iter().find(|r| r.path == "/error-test").unwrap();

        let teapot = WebRequest::new(Method::Get, "/error-test").with_query("error=custom");
        assert_eq!(route.call(&teapot, &registry).unwrap_err().status, 418);

        let plain = WebRequest::new(Method::Get, "/error-test");
        assert!(route.call(&plain, &registry).unwrap().contains("Error Page Testing"));
    }

    #[test]
    fn test_settings_rejects_empty_name() {
        let module = SettingsModule::new("boat");
        let registry = Registry::new();
        let routes = module.http_routes();
        let save = &routes[1];
        assert!(save.requires_auth());

        let request = WebRequest::new(Method::Post, "/save").with_param("deviceName", " ");
        assert_eq!(save.call(&request, &registry).unwrap_err().status, 400);

        let request = WebRequest::new(Method::Post, "/save").with_param("deviceName", "Sea Breeze");
        assert!(save.call(&request, &registry).unwrap().contains("Sea Breeze"));
        let form = routes[0]
            .call(&WebRequest::new(Method::Get, "/"), &registry)
            .unwrap();
        assert!(form.contains(r#"value="Sea Breeze""#));
    }

    #[test]
    fn test_settings_escape_device_name() {
        let module = SettingsModule::new("boat");
        let registry = Registry::new();
        let routes = module.http_routes();

        let request = WebRequest::new(Method::Post, "/save")
            .with_param("deviceName", r#""><script>alert('x')</script>&"#);
        let saved = routes[1].call(&request, &registry).unwrap();
        assert!(!saved.contains("<script>"));
        assert!(saved.contains("&quot;&gt;&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;&amp;"));

        let form = routes[0]
            .call(&WebRequest::new(Method::Get, "/"), &registry)
            .unwrap();
        assert!(form.contains(r#"value="&quot;&gt;&lt;script&gt;"#));
        assert!(!form.contains("<script>"));
    }
}
