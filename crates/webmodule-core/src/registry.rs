//! The web resource registry.
//!
//! One [`Registry`] value owns every shared web resource: redirect rules,
//! static assets, the navigation menu, error page overrides and the CSS
//! state. It is built once at start-up, populated by the application and
//! its modules, then handed to the transport.
//!
//! The registry performs no locking. Apart from the current request path it
//! is read-only once requests are being served; transports that serve
//! requests concurrently must serialize the render cycle themselves.

use std::borrow::Cow;

use tracing::debug;

use crate::assets::{self, AssetTable, IndexedAssets, LinearAssets};
use crate::css::{CssComposer, STYLESHEET_PATH};
use crate::error_pages::{self, ErrorPages};
use crate::html;
use crate::navigation::NavigationMenu;
use crate::redirect::{IndexedRedirects, LinearRedirects, RedirectTable};
use crate::route::{
    is_external_target, NavigationItem, RedirectRule, StaticAsset, StorageHint, WebRoute,
};

/// Outcome of looking up a request path before route dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// A redirect rule matched.
    Redirect { target: &'a str, external: bool },
    /// A static asset is stored at the path.
    Asset(&'a StaticAsset),
    /// Neither; dispatch to module routes.
    Unmatched,
}

/// Process-wide store of web resources.
pub struct Registry {
    redirects: Box<dyn RedirectTable>,
    assets: Box<dyn AssetTable>,
    navigation: NavigationMenu,
    error_pages: ErrorPages,
    css: CssComposer,
}

impl Registry {
    /// Registry backed by linear-scan tables.
    pub fn new() -> Self {
        Self::with_tables(Box::new(LinearRedirects::new()), Box::new(LinearAssets::new()))
    }

    /// Registry backed by hash-indexed tables, for larger configurations.
    pub fn indexed() -> Self {
        Self::with_tables(
            Box::new(IndexedRedirects::new()),
            Box::new(IndexedAssets::new()),
        )
    }

    pub fn with_tables(redirects: Box<dyn RedirectTable>, assets: Box<dyn AssetTable>) -> Self {
        Self {
            redirects,
            assets,
            navigation: NavigationMenu::new(),
            error_pages: ErrorPages::new(),
            css: CssComposer::new(),
        }
    }

    // ========================================================================
    // Redirects
    // ========================================================================

    /// Append a redirect rule. Duplicates are kept; the first one wins.
    pub fn add_redirect(&mut self, from_path: impl Into<String>, to_path: impl Into<String>) {
        let rule = RedirectRule::new(from_path, to_path);
        debug!(from = %rule.from_path, to = %rule.to_path, "Redirect added");
        self.redirects.add(rule);
    }

    /// Target for `path`, if a rule matches exactly.
    pub fn redirect_target(&self, path: &str) -> Option<&str> {
        self.redirects.resolve(path)
    }

    pub fn redirects(&self) -> &[RedirectRule] {
        self.redirects.rules()
    }

    // ========================================================================
    // Static assets
    // ========================================================================

    pub fn add_static_asset(
        &mut self,
        path: impl Into<String>,
        content: impl Into<Cow<'static, str>>,
        mime_type: impl Into<String>,
        storage: StorageHint,
    ) {
        self.add_asset(StaticAsset::new(path, content, mime_type, storage));
    }

    pub fn add_asset(&mut self, asset: StaticAsset) {
        debug!(
            path = %asset.path,
            mime = %asset.mime_type,
            bytes = asset.content.len(),
            "Static asset added"
        );
        self.assets.add(asset);
    }

    pub fn add_javascript(
        &mut self,
        path: impl Into<String>,
        code: impl Into<Cow<'static, str>>,
        storage: StorageHint,
    ) {
        self.add_asset(assets::javascript(path, code, storage));
    }

    /// Add an image. `image_type` is the MIME subtype, e.g. `png`.
    pub fn add_image(
        &mut self,
        path: impl Into<String>,
        data: impl Into<Cow<'static, str>>,
        image_type: &str,
        storage: StorageHint,
    ) {
        self.add_asset(assets::image(path, data, image_type, storage));
    }

    /// Add a font. `font_type` is `ttf`, `otf`, `woff` or `woff2`.
    pub fn add_font(
        &mut self,
        path: impl Into<String>,
        data: impl Into<Cow<'static, str>>,
        font_type: &str,
        storage: StorageHint,
    ) {
        self.add_asset(assets::font(path, data, font_type, storage));
    }

    pub fn static_asset(&self, path: &str) -> Option<&StaticAsset> {
        self.assets.lookup(path)
    }

    pub fn has_static_asset(&self, path: &str) -> bool {
        self.assets.exists(path)
    }

    pub fn static_assets(&self) -> &[StaticAsset] {
        self.assets.assets()
    }

    /// One GET route per stored asset.
    pub fn static_asset_routes(&self) -> Vec<WebRoute> {
        self.assets.to_routes()
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Replace the navigation menu.
    pub fn set_navigation_menu(&mut self, items: Vec<NavigationItem>) {
        debug!(items = items.len(), "Navigation menu set");
        self.navigation.set_items(items);
    }

    pub fn navigation_menu(&self) -> &[NavigationItem] {
        self.navigation.items()
    }

    /// Set the path of the request about to be rendered.
    pub fn set_current_path(&mut self, path: impl Into<String>) {
        self.navigation.set_current_path(path);
    }

    pub fn current_path(&self) -> &str {
        self.navigation.current_path()
    }

    /// The menu fragment for the current path. Empty without items.
    pub fn navigation_html(&self) -> String {
        self.navigation.render()
    }

    /// Inject the menu into a page. Unchanged when no menu is configured.
    pub fn inject_navigation_menu(&self, page: &str) -> String {
        self.navigation.inject(page)
    }

    // ========================================================================
    // Error pages
    // ========================================================================

    pub fn set_error_page(&mut self, code: u16, html: impl Into<String>) {
        self.error_pages.set_page(code, html);
    }

    /// Override for `code`, or the generated default.
    pub fn error_page(&self, code: u16) -> String {
        self.error_pages.page(code)
    }

    /// Generated default page, ignoring any override.
    pub fn generate_default_error_page(&self, code: u16, message: &str) -> String {
        error_pages::generate_default(code, message)
    }

    /// Complete error response body for the current request.
    ///
    /// Uses the override when present, otherwise the default page with
    /// `message` as description, then injects the navigation menu.
    pub fn render_error_page(&self, code: u16, message: &str) -> String {
        let page = self.error_pages.page_with_message(code, message);
        self.inject_navigation_menu(&page)
    }

    // ========================================================================
    // CSS
    // ========================================================================

    pub fn css(&self) -> &CssComposer {
        &self.css
    }

    pub fn set_global_css(&mut self, css: impl Into<Cow<'static, str>>) {
        self.css.set_global_css(css);
    }

    pub fn add_custom_css(&mut self, extra: &str) {
        self.css.add_custom_css(extra);
    }

    pub fn set_theme(
        &mut self,
        base: impl Into<Cow<'static, str>>,
        overlay: impl Into<Cow<'static, str>>,
    ) {
        self.css.set_theme(base, overlay);
    }

    pub fn initialize_base_theme(&mut self) {
        self.css.initialize_base_theme();
    }

    pub fn effective_css(&self) -> String {
        self.css.effective_css()
    }

    pub fn css_route(&self) -> WebRoute {
        CssComposer::css_route()
    }

    pub fn theme_asset_routes(&self) -> Vec<WebRoute> {
        self.css.theme_asset_routes()
    }

    /// Make sure a page links the shared stylesheet.
    pub fn inject_stylesheet_link(&self, page: &str) -> String {
        html::inject_stylesheet_link(page, STYLESHEET_PATH)
    }

    // ========================================================================
    // Request resolution
    // ========================================================================

    /// Check redirects, then static assets, for `path`.
    ///
    /// A matching rule with an empty target means no redirect.
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        let target = self.redirect_target(path).filter(|target| !target.is_empty());
        if let Some(target) = target {
            return Resolution::Redirect {
                target,
                external: is_external_target(target),
            };
        }
        match self.static_asset(path) {
            Some(asset) => Resolution::Asset(asset),
            None => Resolution::Unmatched,
        }
    }

    /// Routes the registry serves itself: the stylesheet and, in themed
    /// mode, the individual theme layers.
    pub fn builtin_routes(&self) -> Vec<WebRoute> {
        let mut routes = vec![self.css_route()];
        routes.extend(self.theme_asset_routes());
        routes
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("redirects", &self.redirects.len())
            .field("assets", &self.assets.assets().len())
            .field("navigation", &self.navigation)
            .field("error_pages", &self.error_pages)
            .field("css", &self.css.mode())
            .finish()
    }
}
