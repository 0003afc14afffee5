//! Per-status-code error pages.
//!
//! Firmware can override the page for any status code. Codes without an
//! override get a generated page that uses the shared stylesheet and carries
//! the navigation placeholder, so it picks up the active theme and menu.
//! Generated pages are never stored.

use std::collections::BTreeMap;
use std::fmt::Write;

use tracing::debug;

use crate::css::STYLESHEET_PATH;
use crate::html::NAV_PLACEHOLDER;

/// Presentation class of an error page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    /// Transient conditions (503).
    Warning,
}

impl Severity {
    /// CSS class used on the heading and status box.
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// Built-in description of a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub title: String,
    pub description: &'static str,
    pub severity: Severity,
}

/// Look up the built-in title, description and severity for `code`.
pub fn status_info(code: u16) -> StatusInfo {
    let (title, description) = match code {
        400 => (
            "Bad Request",
            "The request could not be understood by the server.",
        ),
        401 => (
            "Unauthorized",
            "Authentication is required to access this resource.",
        ),
        403 => (
            "Forbidden",
            "You don't have permission to access this resource.",
        ),
        404 => (
            "Page Not Found",
            "The requested page could not be found on this server.",
        ),
        405 => (
            "Method Not Allowed",
            "The request method is not allowed for this resource.",
        ),
        500 => (
            "Internal Server Error",
            "The server encountered an unexpected condition.",
        ),
        502 => (
            "Bad Gateway",
            "The server received an invalid response from an upstream server.",
        ),
        503 => (
            "Service Unavailable",
            "The server is temporarily unavailable.",
        ),
        _ => ("Error", "An error occurred while processing your request."),
    };
    let severity = if code == 503 {
        Severity::Warning
    } else {
        Severity::Error
    };
    StatusInfo {
        title: format!("{} {}", code, title),
        description,
        severity,
    }
}

/// Generate the default page for `code`.
///
/// A non-empty `message` replaces the built-in description. Navigation is
/// not injected: callers set the current path and inject it themselves.
pub fn generate_default(code: u16, message: &str) -> String {
    let info = status_info(code);
    let description = if message.is_empty() {
        info.description
    } else {
        message
    };
    let class = info.severity.css_class();

    let mut html = String::with_capacity(1536);
    // Writing to a String cannot fail
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <link rel="stylesheet" href="{stylesheet}">
</head>
<body>
  <div class="container">
    {placeholder}
    <div class="error-page">
      <h1 class="{class}">{title}</h1>
      <p class="error-description">{description}</p>
      <div class="status-message {class}">
        <strong>What can you do?</strong><br>
        &bull; Check the URL for typos<br>
        &bull; Use the navigation menu above<br>
        &bull; Return to the home page
      </div>
      <div class="error-actions button-group">
        <a href="/" class="btn btn-primary">Return to Home</a>
        <a href="javascript:history.back()" class="btn btn-secondary">Go Back</a>
      </div>
    </div>
  </div>
</body>
</html>
"#,
        title = info.title,
        stylesheet = STYLESHEET_PATH,
        placeholder = NAV_PLACEHOLDER,
        class = class,
        description = description,
    );
    html
}

/// Custom error page overrides, keyed by status code.
#[derive(Debug, Clone, Default)]
pub struct ErrorPages {
    overrides: BTreeMap<u16, String>,
}

impl ErrorPages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace the override for `code`.
    pub fn set_page(&mut self, code: u16, html: impl Into<String>) {
        debug!(code, "Custom error page set");
        self.overrides.insert(code, html.into());
    }

    pub fn has_override(&self, code: u16) -> bool {
        self.overrides.contains_key(&code)
    }

    pub fn override_for(&self, code: u16) -> Option<&str> {
        self.overrides.get(&code).map(String::as_str)
    }

    /// Override for `code`, or the generated default page.
    pub fn page(&self, code: u16) -> String {
        self.page_with_message(code, "")
    }

    /// Override for `code`, or the generated default page describing
    /// `message`.
    pub fn page_with_message(&self, code: u16, message: &str) -> String {
        match self.overrides.get(&code) {
            Some(html) => html.clone(),
            None => generate_default(code, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_404_page() {
        let pages = ErrorPages::new();
        let html = pages.page(404);
        assert!(html.contains("<title>404 Page Not Found</title>"));
        assert!(html.contains("The requested page could not be found on this server."));
        assert!(html.contains(r#"<h1 class="error">"#));
        assert!(html.contains(NAV_PLACEHOLDER));
        assert!(html.contains(r#"href="/assets/style.css""#));
    }

    #[test]
    fn test_override_returned_verbatim() {
        let mut pages = ErrorPages::new();
        pages.set_page(404, "<custom/>");
        assert_eq!(pages.page(404), "<custom/>");
        assert_eq!(pages.page_with_message(404, "ignored"), "<custom/>");
        // Other codes still generated
        assert!(pages.page(500).contains("500 Internal Server Error"));
    }

    #[test]
    fn test_override_replaced() {
        let mut pages = ErrorPages::new();
        pages.set_page(500, "first");
        pages.set_page(500, "second");
        assert_eq!(pages.override_for(500), Some("second"));
    }

    #[test]
    fn test_service_unavailable_is_warning() {
        assert_eq!(status_info(503).severity, Severity::Warning);
        let html = generate_default(503, "");
        assert!(html.contains(r#"<h1 class="warning">503 Service Unavailable</h1>"#));
        assert!(html.contains(r#"<div class="status-message warning">"#));
    }

    #[test]
    fn test_known_codes() {
        for (code, title) in [
            (400, "400 Bad Request"),
            (401, "401 Unauthorized"),
            (403, "403 Forbidden"),
            (405, "405 Method Not Allowed"),
            (502, "502 Bad Gateway"),
        ] {
            let info = status_info(code);
            assert_eq!(info.title, title);
            assert_eq!(info.severity, Severity::Error);
        }
    }

    #[test]
    fn test_unknown_code_with_message() {
        let html = generate_default(418, "I'm a teapot! This server refuses to brew coffee.");
        assert!(html.contains("<title>418 Error</title>"));
        assert!(html.contains("I'm a teapot! This server refuses to brew coffee."));
        assert!(!html.contains("An error occurred while processing your request."));
    }

    #[test]
    fn test_unknown_code_default_description() {
        let html = generate_default(599, "");
        assert!(html.contains("599 Error"));
        assert!(html.contains("An error occurred while processing your request."));
    }

    #[test]
    fn test_message_overrides_known_description() {
        let html = generate_default(404, "User not found");
        assert!(html.contains(r#"<p class="error-description">User not found</p>"#));
        assert!(!html.contains("could not be found on this server"));
    }
}
