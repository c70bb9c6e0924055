//! Icon assets referenced by rich presence payloads.
//!
//! An [`Asset`] turns a descriptor into a decoded image on demand. Bundled icons are held in
//! memory by [`LocalAsset`]; [`WebAsset`] fetches and decodes a remote image every time it is
//! asked and reports failures as "no image".
use std::fmt;
use std::sync::Arc;

use image::DynamicImage;
use serde::ser::{Serialize, SerializeStruct, Serializer};

mod error;
mod local;
mod transport;
mod web;

pub use error::AssetError;
pub use local::LocalAsset;
pub use transport::{
    DEFAULT_MAX_IMAGE_BYTES, ImageTransport, ReqwestTransport, SharedImageTransport,
};
pub use web::WebAsset;

/// Where an asset's pixels come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Local,
    Web,
}

impl AssetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Local => "local",
            AssetKind::Web => "web",
        }
    }
}

pub trait Asset: Send + Sync {
    fn kind(&self) -> AssetKind;

    /// Stable identifier: the bundle key for local assets, the source URL for web assets.
    fn id(&self) -> &str;

    /// Produces the image, optionally picking the rendition closest to `size_hint` pixels.
    /// `None` is a normal outcome and never an error for callers.
    fn produce_image(&self, size_hint: Option<u32>) -> Option<DynamicImage>;
}

/// Cheaply cloneable shared reference to an [`Asset`].
#[derive(Clone)]
pub struct AssetHandle(Arc<dyn Asset>);

impl AssetHandle {
    pub fn new<A>(asset: A) -> Self
    where
        A: Asset + 'static,
    {
        Self(Arc::new(asset))
    }

    pub fn kind(&self) -> AssetKind {
        self.0.kind()
    }

    pub fn id(&self) -> &str {
        self.0.id()
    }

    pub fn produce_image(&self, size_hint: Option<u32>) -> Option<DynamicImage> {
        self.0.produce_image(size_hint)
    }
}

impl From<LocalAsset> for AssetHandle {
    fn from(asset: LocalAsset) -> Self {
        Self::new(asset)
    }
}

impl From<WebAsset> for AssetHandle {
    fn from(asset: WebAsset) -> Self {
        Self::new(asset)
    }
}

impl PartialEq for AssetHandle {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.id() == other.id()
    }
}

impl Eq for AssetHandle {}

impl fmt::Debug for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetHandle")
            .field("kind", &self.kind())
            .field("id", &self.id())
            .finish()
    }
}

impl Serialize for AssetHandle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Asset", 2)?;
        state.serialize_field("kind", self.kind().as_str())?;
        state.serialize_field("id", self.id())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn handles_compare_by_kind_and_id() {
        let a = AssetHandle::new(LocalAsset::new("rust", DynamicImage::new_rgba8(4, 4)));
        let b = AssetHandle::new(LocalAsset::new("rust", DynamicImage::new_rgba8(16, 16)));
        let c = AssetHandle::new(LocalAsset::new("kotlin", DynamicImage::new_rgba8(4, 4)));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn handle_serializes_kind_and_id() {
        let handle =
            AssetHandle::new(LocalAsset::new("application", DynamicImage::new_rgba8(2, 2)));
        let value = serde_json::to_value(&handle).unwrap();
        assert_eq!(value, json!({"kind": "local", "id": "application"}));
    }
}
