use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("invalid asset URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported asset URL scheme `{0}`")]
    UnsupportedScheme(String),
    #[error("image request failed: {0}")]
    Transport(#[source] anyhow::Error),
    #[error("image request returned HTTP {0}")]
    Status(u16),
    #[error("image body of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}
