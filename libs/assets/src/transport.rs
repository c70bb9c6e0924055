use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use crate::AssetError;

/// Fetches raw image bytes for a [`crate::WebAsset`].
pub trait ImageTransport: Send + Sync {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, AssetError>;
}

pub type SharedImageTransport = Arc<dyn ImageTransport>;

/// Largest icon body accepted before decoding.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 8 * 1024 * 1024;

/// Blocking HTTP transport. Calls block the current thread and must not run on an async
/// executor thread.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: Client,
    max_bytes: u64,
}

impl ReqwestTransport {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            max_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    pub fn with_timeout(timeout: Duration, user_agent: &str) -> Result<Self, AssetError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|err| AssetError::Transport(err.into()))?;
        Ok(Self::new(http))
    }

    /// Rejects bodies larger than `max_bytes`, whether announced or streamed.
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn shared(self) -> SharedImageTransport {
        Arc::new(self)
    }
}

impl ImageTransport for ReqwestTransport {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, AssetError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|err| AssetError::Transport(err.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::Status(status.as_u16()));
        }

        if let Some(length) = response.content_length() {
            if length > self.max_bytes {
                return Err(AssetError::TooLarge {
                    size: length,
                    limit: self.max_bytes,
                });
            }
        }

        let mut body = Vec::new();
        response
            .take(self.max_bytes + 1)
            .read_to_end(&mut body)
            .map_err(|err| AssetError::Transport(err.into()))?;
        let size = body.len() as u64;
        if size > self.max_bytes {
            return Err(AssetError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }
        Ok(body)
    }
}
