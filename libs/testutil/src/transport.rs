use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use presence_assets::{AssetError, ImageTransport};
use url::Url;

use crate::png_bytes;

#[derive(Debug, Clone)]
pub enum StaticResponse {
    Body(Vec<u8>),
    Status(u16),
    Unreachable,
}

impl StaticResponse {
    pub fn png(width: u32, height: u32) -> Self {
        StaticResponse::Body(png_bytes(width, height))
    }
}

/// Fake HTTP transport answering from a fixed table and recording every request.
/// Unknown URLs behave like an unreachable host.
#[derive(Debug, Default)]
pub struct StaticTransport {
    responses: HashMap<String, StaticResponse>,
    requests: Mutex<Vec<String>>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, response: StaticResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock poisoned").clone()
    }
}

impl ImageTransport for StaticTransport {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, AssetError> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(url.to_string());

        match self.responses.get(url.as_str()) {
            Some(StaticResponse::Body(body)) => Ok(body.clone()),
            Some(StaticResponse::Status(code)) => Err(AssetError::Status(*code)),
            Some(StaticResponse::Unreachable) | None => Err(AssetError::Transport(
                anyhow::anyhow!("connection refused: {url}"),
            )),
        }
    }
}

