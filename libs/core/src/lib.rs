//! Rich presence rendering.
//!
//! The host supplies a [`RenderContext`] and a [`SettingsStore`]; [`PresenceEngine`] selects a
//! renderer for the context's specificity, resolves every field through the shared resolution
//! protocol, and assembles a [`RichPresence`]. Rendering never fails outward: broken templates
//! and unreachable icons only leave fields empty.
pub mod config;
pub mod context;
pub mod engine;
pub mod presence;
pub mod renderer;
pub mod resolve;
pub mod settings;
pub mod values;

pub use config::EngineConfig;
pub use context::{
    ApplicationData, FileData, IconSet, Mode, PresenceData, ProjectData, RenderContext, RenderView,
    SourceInfo,
};
pub use engine::PresenceEngine;
pub use presence::{Button, Image, RichPresence, RichPresenceBuilder};
pub use presence_assets::{
    Asset, AssetError, AssetHandle, AssetKind, ImageTransport, LocalAsset, ReqwestTransport,
    SharedImageTransport, WebAsset,
};
pub use presence_templates::{CustomTemplate, TemplateContext, TemplateError};
pub use renderer::{RenderResources, Renderer, RendererType, select_renderer};
pub use resolve::{TemplateScope, resolve, resolve_text};
pub use settings::{MemorySettingsStore, PresenceSettings, SettingsStore};
pub use values::{
    IconResult, IconValue, Resolution, TemplateValue, TextResult, TextValue, TimeResult,
    TimeValue, ValueDefinition,
};

/// Returns the semantic version advertised by this crate.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
