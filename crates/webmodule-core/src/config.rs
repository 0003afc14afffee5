//! Registry configuration.
//!
//! A [`RegistryConfig`] describes the same resources the firmware would
//! otherwise register in code, so a device image can ship its redirects,
//! menu, error pages, theme and small assets as one JSON document.
//!
//! ```json
//! {
//!   "redirects": [{ "fromPath": "/", "toPath": "/main/" }],
//!   "navigation": [{ "name": "Home", "url": "/main/" }],
//!   "errorPages": { "404": "<html>...</html>" },
//!   "css": { "mode": "theme", "overlay": ":root { --primary-color: #e91e63; }" },
//!   "assets": [{ "path": "/assets/app.js", "content": "...", "mimeType": "application/javascript" }]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::registry::Registry;
use crate::route::{NavigationItem, RedirectRule, StaticAsset, StorageHint};
use crate::theme::DEFAULT_CSS;

/// Errors loading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Stylesheet setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum CssConfig {
    /// One monolithic stylesheet.
    Legacy { css: String },
    /// Base framework plus overlay. A missing base means the built-in one.
    Theme {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base: Option<String>,
        #[serde(default)]
        overlay: String,
    },
    /// Built-in base framework without overlay.
    BaseTheme,
}

/// One static asset entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetConfig {
    pub path: String,
    pub content: String,
    pub mime_type: String,
    #[serde(default)]
    pub storage: StorageHint,
}

/// Declarative registry contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    #[serde(default)]
    pub redirects: Vec<RedirectRule>,

    /// Replaces the menu when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Vec<NavigationItem>>,

    #[serde(default)]
    pub error_pages: BTreeMap<u16, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<CssConfig>,

    #[serde(default)]
    pub assets: Vec<AssetConfig>,
}

impl RegistryConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Register everything into `registry`.
    ///
    /// Redirects and assets are appended after any already registered, so
    /// earlier entries keep precedence.
    pub fn apply(self, registry: &mut Registry) {
        debug!(
            redirects = self.redirects.len(),
            assets = self.assets.len(),
            error_pages = self.error_pages.len(),
            "Applying registry configuration"
        );

        for rule in self.redirects {
            registry.add_redirect(rule.from_path, rule.to_path);
        }
        if let Some(items) = self.navigation {
            registry.set_navigation_menu(items);
        }
        for (code, html) in self.error_pages {
            registry.set_error_page(code, html);
        }
        match self.css {
            Some(CssConfig::Legacy { css }) => registry.set_global_css(css),
            Some(CssConfig::Theme { base, overlay }) => match base {
                Some(base) => registry.set_theme(base, overlay),
                None => registry.set_theme(DEFAULT_CSS, overlay),
            },
            Some(CssConfig::BaseTheme) => registry.initialize_base_theme(),
            None => {}
        }
        for asset in self.assets {
            registry.add_asset(StaticAsset::new(
                asset.path,
                asset.content,
                asset.mime_type,
                asset.storage,
            ));
        }
    }
}

impl Registry {
    /// Populate the registry from a configuration document.
    pub fn apply_config(&mut self, config: RegistryConfig) {
        config.apply(self);
    }
}
