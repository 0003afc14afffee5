//! Navigation menu rendering.
//!
//! The menu is an ordered list of links shared by every module's pages. The
//! entry matching the in-flight request path is marked `active`.

use std::fmt::Write;

use crate::html;
use crate::route::NavigationItem;

/// Navigation items plus the path of the request being rendered.
#[derive(Debug, Clone, Default)]
pub struct NavigationMenu {
    items: Vec<NavigationItem>,
    current_path: String,
}

impl NavigationMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole menu.
    pub fn set_items(&mut self, items: Vec<NavigationItem>) {
        self.items = items;
    }

    pub fn items(&self) -> &[NavigationItem] {
        &self.items
    }

    /// Set the path used for active-link detection.
    pub fn set_current_path(&mut self, path: impl Into<String>) {
        self.current_path = path.into();
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Render the menu for the current path.
    pub fn render(&self) -> String {
        render_for(&self.items, &self.current_path)
    }

    /// Inject the rendered menu into a page.
    pub fn inject(&self, page: &str) -> String {
        html::render_into(page, &self.render())
    }
}

/// Whether a menu entry pointing at `url` is active for `current_path`.
///
/// Matching is by prefix so `/settings/` stays highlighted on
/// `/settings/wifi`, except for `/`, which would otherwise match every path
/// and so requires an exact match.
pub fn is_active(url: &str, current_path: &str) -> bool {
    if current_path.is_empty() {
        return false;
    }
    current_path == url || (url != "/" && current_path.starts_with(url))
}

/// Render `items` as a `nav-links` fragment. Empty when there are no items.
pub fn render_for(items: &[NavigationItem], current_path: &str) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut out = String::from("<div class=\"nav-links\">\n");
    for item in items {
        // Writing to a String cannot fail
        let _ = write!(out, "  <a href=\"{}\"", item.url);
        if is_active(&item.url, current_path) {
            out.push_str(" class=\"active\"");
        }
        if let Some(target) = item.target.as_deref().filter(|t| !t.is_empty()) {
            let _ = write!(out, " target=\"{}\"", target);
        }
        let _ = writeln!(out, ">{}</a>", item.name);
    }
    out.push_str("</div>\n");
    out
}
