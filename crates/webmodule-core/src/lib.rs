//! # webmodule-core
//!
//! Web resource registry and templating engine for embedded devices.
//!
//! This crate provides:
//! - Route, redirect, asset and navigation value types
//! - Redirect and static asset tables (exact match, first wins)
//! - Navigation menu rendering and HTML injection
//! - CSS composition (legacy stylesheet or base + theme overlay)
//! - Per-status-code error pages
//! - The `WebModule` trait feature modules implement
//!
//! This crate is intentionally runtime-agnostic and contains no async code,
//! so the same registry runs behind axum on Linux or a bare embedded HTTP
//! server.

pub mod assets;
pub mod auth;
pub mod config;
pub mod css;
pub mod error;
pub mod error_pages;
pub mod html;
pub mod module;
pub mod navigation;
pub mod redirect;
pub mod registry;
pub mod request;
pub mod route;
pub mod theme;

pub use assets::{AssetTable, IndexedAssets, LinearAssets};
pub use auth::{AuthContext, AuthRequirements, AuthType};
pub use config::{ConfigError, RegistryConfig};
pub use css::{CssComposer, CssMode};
pub use error::HttpError;
pub use module::WebModule;
pub use redirect::{IndexedRedirects, LinearRedirects, RedirectTable};
pub use registry::{Registry, Resolution};
pub use request::WebRequest;
pub use route::{
    Method, NavigationItem, RedirectRule, RouteHandler, RouteResult, StaticAsset, StorageHint,
    WebRoute,
};
