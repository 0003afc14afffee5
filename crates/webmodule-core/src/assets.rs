//! Static asset storage.
//!
//! Assets are pre-built response bodies (scripts, images, fonts, JSON)
//! served byte-for-byte at a fixed path. Lookup is exact-match and
//! first-wins, like redirects.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::route::{StaticAsset, StorageHint, WebRoute};

pub const JAVASCRIPT_MIME: &str = "application/javascript";
pub const OCTET_STREAM_MIME: &str = "application/octet-stream";

/// Image type used when the caller does not name one.
pub const DEFAULT_IMAGE_TYPE: &str = "png";
/// Font type used when the caller does not name one.
pub const DEFAULT_FONT_TYPE: &str = "ttf";

/// Storage for static assets.
pub trait AssetTable: Send + Sync {
    /// Append an asset unconditionally.
    fn add(&mut self, asset: StaticAsset);

    /// First asset stored under `path`.
    fn lookup(&self, path: &str) -> Option<&StaticAsset>;

    /// All assets in insertion order.
    fn assets(&self) -> &[StaticAsset];

    fn exists(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    /// One GET route per asset, in insertion order.
    fn to_routes(&self) -> Vec<WebRoute> {
        self.assets().iter().map(StaticAsset::to_route).collect()
    }
}

/// Linear-scan asset table.
#[derive(Debug, Clone, Default)]
pub struct LinearAssets {
    assets: Vec<StaticAsset>,
}

impl LinearAssets {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssetTable for LinearAssets {
    fn add(&mut self, asset: StaticAsset) {
        self.assets.push(asset);
    }

    fn lookup(&self, path: &str) -> Option<&StaticAsset> {
        self.assets.iter().find(|asset| asset.path == path)
    }

    fn assets(&self) -> &[StaticAsset] {
        &self.assets
    }
}

/// Hash-indexed asset table. First-inserted asset wins on duplicates.
#[derive(Debug, Clone, Default)]
pub struct IndexedAssets {
    assets: Vec<StaticAsset>,
    index: HashMap<String, usize>,
}

impl IndexedAssets {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssetTable for IndexedAssets {
    fn add(&mut self, asset: StaticAsset) {
        let position = self.assets.len();
        self.index.entry(asset.path.clone()).or_insert(position);
        self.assets.push(asset);
    }

    fn lookup(&self, path: &str) -> Option<&StaticAsset> {
        self.index.get(path).map(|&i| &self.assets[i])
    }

    fn assets(&self) -> &[StaticAsset] {
        &self.assets
    }
}

/// MIME type for an image of the given type (`png`, `svg+xml`, ...).
pub fn image_mime_type(image_type: &str) -> String {
    format!("image/{}", image_type)
}

/// MIME type for a font, `application/octet-stream` for unknown types.
pub fn font_mime_type(font_type: &str) -> String {
    match font_type {
        "ttf" | "otf" | "woff" | "woff2" => format!("font/{}", font_type),
        _ => OCTET_STREAM_MIME.to_string(),
    }
}

/// Build a JavaScript asset.
pub fn javascript(
    path: impl Into<String>,
    code: impl Into<Cow<'static, str>>,
    storage: StorageHint,
) -> StaticAsset {
    StaticAsset::new(path, code, JAVASCRIPT_MIME, storage)
}

/// Build an image asset.
pub fn image(
    path: impl Into<String>,
    data: impl Into<Cow<'static, str>>,
    image_type: &str,
    storage: StorageHint,
) -> StaticAsset {
    StaticAsset::new(path, data, image_mime_type(image_type), storage)
}

/// Build a font asset.
pub fn font(
    path: impl Into<String>,
    data: impl Into<Cow<'static, str>>,
    font_type: &str,
    storage: StorageHint,
) -> StaticAsset {
    StaticAsset::new(path, data, font_mime_type(font_type), storage)
}
