use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use image::DynamicImage;

use crate::{Asset, AssetError, AssetKind};

/// Icon bundled with the host, pre-decoded at one or more sizes.
///
/// Renditions are keyed by their longer edge. A local asset always holds at least one image,
/// so [`Asset::produce_image`] never returns `None`.
#[derive(Clone)]
pub struct LocalAsset {
    key: String,
    renditions: BTreeMap<u32, Arc<DynamicImage>>,
}

impl LocalAsset {
    pub fn new(key: impl Into<String>, image: DynamicImage) -> Self {
        let mut renditions = BTreeMap::new();
        renditions.insert(edge(&image), Arc::new(image));
        Self {
            key: key.into(),
            renditions,
        }
    }

    /// Decodes a bundled image (PNG or JPEG).
    pub fn from_bytes(key: impl Into<String>, bytes: &[u8]) -> Result<Self, AssetError> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::new(key, image))
    }

    /// Adds a pre-rendered size. A rendition with the same edge length is replaced.
    pub fn with_rendition(mut self, image: DynamicImage) -> Self {
        self.renditions.insert(edge(&image), Arc::new(image));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn sizes(&self) -> Vec<u32> {
        self.renditions.keys().copied().collect()
    }

    fn select(&self, size_hint: Option<u32>) -> Option<&Arc<DynamicImage>> {
        size_hint
            .and_then(|hint| self.renditions.range(hint..).next())
            .or_else(|| self.renditions.iter().next_back())
            .map(|(_, image)| image)
    }
}

fn edge(image: &DynamicImage) -> u32 {
    image.width().max(image.height())
}

impl Asset for LocalAsset {
    fn kind(&self) -> AssetKind {
        AssetKind::Local
    }

    fn id(&self) -> &str {
        &self.key
    }

    fn produce_image(&self, size_hint: Option<u32>) -> Option<DynamicImage> {
        self.select(size_hint).map(|image| image.as_ref().clone())
    }
}

impl fmt::Debug for LocalAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalAsset")
            .field("key", &self.key)
            .field("sizes", &self.sizes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use image::ImageFormat;

    fn asset() -> LocalAsset {
        LocalAsset::new("rust", DynamicImage::new_rgba8(16, 16))
            .with_rendition(DynamicImage::new_rgba8(64, 64))
            .with_rendition(DynamicImage::new_rgba8(256, 256))
    }

    #[test]
    fn without_hint_returns_largest() {
        let image = asset().produce_image(None).unwrap();
        assert_eq!(image.width(), 256);
    }

    #[test]
    fn hint_picks_smallest_rendition_that_fits() {
        let asset = asset();
        assert_eq!(asset.produce_image(Some(16)).unwrap().width(), 16);
        assert_eq!(asset.produce_image(Some(17)).unwrap().width(), 64);
        assert_eq!(asset.produce_image(Some(100)).unwrap().width(), 256);
    }

    #[test]
    fn oversized_hint_falls_back_to_largest() {
        assert_eq!(asset().produce_image(Some(1024)).unwrap().width(), 256);
    }

    #[test]
    fn renditions_are_keyed_by_longer_edge() {
        let asset = LocalAsset::new("wide", DynamicImage::new_rgba8(32, 8));
        assert_eq!(asset.sizes(), vec![32]);
    }

    #[test]
    fn from_bytes_decodes_png() {
        let mut bytes = Vec::new();
        DynamicImage::new_rgba8(8, 8)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        let asset = LocalAsset::from_bytes("png", &bytes).unwrap();
        assert_eq!(asset.sizes(), vec![8]);
        assert_eq!(asset.id(), "png");
    }

    #[test]
    fn from_bytes_rejects_garbage() {
        let err = LocalAsset::from_bytes("broken", b"not an image").unwrap_err();
        assert!(matches!(err, AssetError::Decode(_)));
    }
}
