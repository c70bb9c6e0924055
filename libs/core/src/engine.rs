use presence_assets::{AssetError, ReqwestTransport, SharedImageTransport};
use tracing::debug;

use crate::config::EngineConfig;
use crate::context::RenderContext;
use crate::presence::RichPresence;
use crate::renderer::{RenderResources, Renderer, select_renderer};
use crate::settings::SettingsStore;

/// Host-facing entry point: turns a context into a presence payload.
///
/// Rendering is synchronous. Web icons are fetched on the calling thread, so hosts should call
/// [`PresenceEngine::render`] away from interactive threads.
pub struct PresenceEngine<S> {
    settings: S,
    transport: SharedImageTransport,
    config: EngineConfig,
}

impl<S: SettingsStore> PresenceEngine<S> {
    pub fn new(settings: S, transport: SharedImageTransport) -> Self {
        Self {
            settings,
            transport,
            config: EngineConfig::default(),
        }
    }

    /// Builds an engine with a blocking HTTP transport configured from the environment.
    pub fn from_env(settings: S) -> Result<Self, AssetError> {
        let config = EngineConfig::from_env();
        let transport = ReqwestTransport::with_timeout(config.http_timeout, &config.user_agent)?
            .with_max_bytes(config.max_icon_bytes)
            .shared();
        Ok(Self::new(settings, transport).with_config(config))
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn select<'a>(&self, context: &'a RenderContext) -> Option<Renderer<'a>> {
        select_renderer(context)
    }

    /// Renders the payload for `context`, or `None` when no renderer applies.
    ///
    /// Never fails: asset and template problems only leave fields empty.
    pub fn render(&self, context: &RenderContext) -> Option<RichPresence> {
        let Some(renderer) = select_renderer(context) else {
            debug!(specificity = context.specificity().as_str(), "no renderer for context");
            return None;
        };
        let settings = self
            .settings
            .presence(renderer.kind(), context.mode)
            .unwrap_or_default();
        Some(renderer.render(&settings, &self.resources()))
    }

    fn resources(&self) -> RenderResources<'_> {
        RenderResources {
            transport: &self.transport,
            icon_size: self.config.icon_size,
            party_id: self.config.party_id.as_deref(),
        }
    }
}
