use std::fmt;

use image::DynamicImage;
use tracing::warn;
use url::Url;

use crate::{Asset, AssetError, AssetKind, SharedImageTransport};

/// Remote image addressed by URL.
///
/// Every call to [`Asset::produce_image`] performs a fresh fetch and decode. Nothing is cached
/// and nothing is retried. The size hint is ignored; the remote image is returned as served.
#[derive(Clone)]
pub struct WebAsset {
    source: String,
    transport: SharedImageTransport,
}

impl WebAsset {
    pub fn new(source: impl Into<String>, transport: SharedImageTransport) -> Self {
        Self {
            source: source.into(),
            transport,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Fetches and decodes the image, surfacing the failure reason.
    pub fn fetch(&self) -> Result<DynamicImage, AssetError> {
        let url = Url::parse(&self.source).map_err(|source| AssetError::InvalidUrl {
            url: self.source.clone(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AssetError::UnsupportedScheme(url.scheme().to_string()));
        }

        let bytes = self.transport.fetch(&url)?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

impl Asset for WebAsset {
    fn kind(&self) -> AssetKind {
        AssetKind::Web
    }

    fn id(&self) -> &str {
        &self.source
    }

    fn produce_image(&self, _size_hint: Option<u32>) -> Option<DynamicImage> {
        match self.fetch() {
            Ok(image) => Some(image),
            Err(err) => {
                warn!(error = %err, "failed to load image from URL: {}", self.source);
                None
            }
        }
    }
}

impl fmt::Debug for WebAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebAsset")
            .field("source", &self.source)
            .finish()
    }
}
