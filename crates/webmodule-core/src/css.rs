//! Stylesheet composition.
//!
//! Two mutually exclusive modes:
//! - **Legacy** - one monolithic stylesheet set directly.
//! - **Themed** - a shared base framework plus an overlay of overrides. The
//!   overlay is appended after the base, so its rules win on the cascade.
//!
//! Whichever setter ran last decides the mode; each setter replaces the
//! whole state.

use std::borrow::Cow;

use tracing::debug;

use crate::error::HttpError;
use crate::route::WebRoute;
use crate::theme::DEFAULT_CSS;

/// Combined (or legacy) stylesheet path.
pub const STYLESHEET_PATH: &str = "/assets/style.css";
/// Base framework path, themed mode only.
pub const BASE_CSS_PATH: &str = "/assets/base.css";
/// Theme overlay path, themed mode only.
pub const THEME_CSS_PATH: &str = "/assets/theme.css";

pub const CSS_CONTENT_TYPE: &str = "text/css";

/// Current stylesheet composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssMode {
    Legacy(Cow<'static, str>),
    Themed {
        base: Cow<'static, str>,
        overlay: Cow<'static, str>,
    },
}

impl Default for CssMode {
    fn default() -> Self {
        CssMode::Legacy(Cow::Borrowed(DEFAULT_CSS))
    }
}

/// Owns the stylesheet state.
#[derive(Debug, Clone, Default)]
pub struct CssComposer {
    mode: CssMode,
}

impl CssComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &CssMode {
        &self.mode
    }

    pub fn is_themed(&self) -> bool {
        matches!(self.mode, CssMode::Themed { .. })
    }

    /// Switch to legacy mode with `css` as the whole stylesheet.
    pub fn set_global_css(&mut self, css: impl Into<Cow<'static, str>>) {
        let css = css.into();
        debug!(bytes = css.len(), "Global CSS set");
        self.mode = CssMode::Legacy(css);
    }

    /// Switch to themed mode.
    pub fn set_theme(
        &mut self,
        base: impl Into<Cow<'static, str>>,
        overlay: impl Into<Cow<'static, str>>,
    ) {
        let (base, overlay) = (base.into(), overlay.into());
        debug!(
            base_bytes = base.len(),
            overlay_bytes = overlay.len(),
            "Theme set"
        );
        self.mode = CssMode::Themed { base, overlay };
    }

    /// Activate themed mode with the built-in base and no overlay.
    ///
    /// Does nothing if themed mode is already active.
    pub fn initialize_base_theme(&mut self) {
        if self.is_themed() {
            return;
        }
        self.set_theme(DEFAULT_CSS, "");
    }

    /// Append rules to the active stylesheet.
    ///
    /// In legacy mode the rules are appended to the stylesheet; in themed
    /// mode to the overlay.
    pub fn add_custom_css(&mut self, extra: &str) {
        match &mut self.mode {
            CssMode::Legacy(css) => append_rules(css, extra),
            CssMode::Themed { overlay, .. } => append_rules(overlay, extra),
        }
    }

    /// The stylesheet served at [`STYLESHEET_PATH`].
    pub fn effective_css(&self) -> String {
        match &self.mode {
            CssMode::Legacy(css) => css.to_string(),
            CssMode::Themed { base, overlay } => format!("{}\n{}", base, overlay),
        }
    }

    /// Base framework, themed mode only.
    pub fn base_css(&self) -> Option<&str> {
        match &self.mode {
            CssMode::Themed { base, .. } => Some(&**base),
            CssMode::Legacy(_) => None,
        }
    }

    /// Theme overlay, themed mode only.
    pub fn overlay_css(&self) -> Option<&str> {
        match &self.mode {
            CssMode::Themed { overlay, .. } => Some(&**overlay),
            CssMode::Legacy(_) => None,
        }
    }

    /// Route serving the effective stylesheet.
    ///
    /// The handler reads the registry at request time, so it keeps serving
    /// the right stylesheet after the mode changes.
    pub fn css_route() -> WebRoute {
        WebRoute::get(STYLESHEET_PATH, |_, registry| Ok(registry.effective_css()))
            .with_content_type(CSS_CONTENT_TYPE)
            .with_description("Global CSS stylesheet")
    }

    /// Routes for the individual theme layers.
    ///
    /// Empty in legacy mode; each layer is omitted when its stylesheet is
    /// empty.
    pub fn theme_asset_routes(&self) -> Vec<WebRoute> {
        let mut routes = Vec::new();
        let CssMode::Themed { base, overlay } = &self.mode else {
            return routes;
        };

        if !base.is_empty() {
            routes.push(
                WebRoute::get(BASE_CSS_PATH, |_, registry| {
                    registry
                        .css()
                        .base_css()
                        .map(str::to_string)
                        .ok_or_else(|| HttpError::status(404))
                })
                .with_content_type(CSS_CONTENT_TYPE)
                .with_description("Base CSS framework"),
            );
        }
        if !overlay.is_empty() {
            routes.push(
                WebRoute::get(THEME_CSS_PATH, |_, registry| {
                    registry
                        .css()
                        .overlay_css()
                        .map(str::to_string)
                        .ok_or_else(|| HttpError::status(404))
                })
                .with_content_type(CSS_CONTENT_TYPE)
                .with_description("Theme overlay CSS"),
            );
        }
        routes
    }
}

fn append_rules(css: &mut Cow<'static, str>, extra: &str) {
    if css.is_empty() {
        *css = Cow::Owned(extra.to_string());
    } else {
        let owned = css.to_mut();
        owned.push('\n');
        owned.push_str(extra);
    }
}
