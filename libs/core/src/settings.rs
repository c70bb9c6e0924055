//! Field definitions per renderer and mode.
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::context::Mode;
use crate::presence::Button;
use crate::renderer::RendererType;
use crate::values::{IconValue, TemplateValue, TextValue, TimeValue};

/// Everything one renderer needs to resolve a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceSettings {
    pub details: Option<TextValue>,
    pub details_custom: Option<TemplateValue>,
    pub state: Option<TextValue>,
    pub state_custom: Option<TemplateValue>,
    pub large_icon: Option<IconValue>,
    pub large_icon_custom: Option<TemplateValue>,
    pub large_icon_text: Option<TextValue>,
    pub large_icon_text_custom: Option<TemplateValue>,
    pub small_icon: Option<IconValue>,
    pub small_icon_custom: Option<TemplateValue>,
    pub small_icon_text: Option<TextValue>,
    pub small_icon_text_custom: Option<TemplateValue>,
    pub start_timestamp: Option<TimeValue>,
    pub button1: Option<Button>,
    pub button2: Option<Button>,
}

pub trait SettingsStore: Send + Sync {
    fn presence(&self, renderer: RendererType, mode: Mode) -> Option<PresenceSettings>;
}

impl<S> SettingsStore for Arc<S>
where
    S: SettingsStore + ?Sized,
{
    fn presence(&self, renderer: RendererType, mode: Mode) -> Option<PresenceSettings> {
        (**self).presence(renderer, mode)
    }
}

/// In-memory store holding saved settings and pending preview overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySettingsStore {
    #[serde(default)]
    normal: BTreeMap<RendererType, PresenceSettings>,
    #[serde(default)]
    preview: BTreeMap<RendererType, PresenceSettings>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, renderer: RendererType, settings: PresenceSettings) -> Self {
        self.set(renderer, settings);
        self
    }

    pub fn set(&mut self, renderer: RendererType, settings: PresenceSettings) {
        self.normal.insert(renderer, settings);
    }

    pub fn set_preview(&mut self, renderer: RendererType, settings: PresenceSettings) {
        self.preview.insert(renderer, settings);
    }

    pub fn clear_preview(&mut self) {
        self.preview.clear();
    }
}

impl SettingsStore for MemorySettingsStore {
    /// Preview falls back to the saved settings when no override is pending.
    fn presence(&self, renderer: RendererType, mode: Mode) -> Option<PresenceSettings> {
        let saved = self.normal.get(&renderer);
        let selected = match mode {
            Mode::Normal => saved,
            Mode::Preview => self.preview.get(&renderer).or(saved),
        };
        selected.cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(text: &str) -> PresenceSettings {
        PresenceSettings {
            details: Some(TextValue::Fixed(text.into())),
            ..Default::default()
        }
    }

    #[test]
    fn preview_overrides_saved_settings() {
        let mut store = MemorySettingsStore::new().with(RendererType::Project, details("saved"));
        store.set_preview(RendererType::Project, details("pending"));

        let normal = store.presence(RendererType::Project, Mode::Normal).unwrap();
        let preview = store.presence(RendererType::Project, Mode::Preview).unwrap();
        assert_eq!(normal.details, Some(TextValue::Fixed("saved".into())));
        assert_eq!(preview.details, Some(TextValue::Fixed("pending".into())));

        store.clear_preview();
        let preview = store.presence(RendererType::Project, Mode::Preview).unwrap();
        assert_eq!(preview.details, Some(TextValue::Fixed("saved".into())));
    }

    #[test]
    fn unknown_renderer_has_no_settings() {
        let store = MemorySettingsStore::new().with(RendererType::File, details("x"));
        assert!(store.presence(RendererType::Idle, Mode::Normal).is_none());
    }

    #[test]
    fn loads_from_json() {
        let store: MemorySettingsStore = serde_json::from_str(
            r#"{
                "normal": {
                    "project": {
                        "details": {"type": "project_name"},
                        "large_icon": {"type": "custom"},
                        "large_icon_custom": "https://cdn.test/{{project.name}}.png",
                        "button1": {"title": "Repo", "url": "https://example.test"}
                    }
                }
            }"#,
        )
        .unwrap();

        let settings = store.presence(RendererType::Project, Mode::Preview).unwrap();
        assert_eq!(settings.details, Some(TextValue::ProjectName));
        assert_eq!(settings.large_icon, Some(IconValue::Custom));
        assert_eq!(
            settings.large_icon_custom.as_ref().map(TemplateValue::source),
            Some("https://cdn.test/{{project.name}}.png")
        );
        assert!(settings.state.is_none());
    }
}
