use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use presence_core::{
    IconSet, LocalAsset, MemorySettingsStore, Mode, PresenceData, RenderContext, RendererType,
    SourceInfo,
};
use serde::Deserialize;

/// Icon files referenced by a fixture, relative to the fixture's directory.
#[derive(Debug, Deserialize)]
pub struct IconFiles {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub application: Option<PathBuf>,
    #[serde(default)]
    pub languages: BTreeMap<String, PathBuf>,
    #[serde(default)]
    pub fallback_language: Option<PathBuf>,
}

fn default_theme() -> String {
    "classic".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub application_id: Option<String>,
    #[serde(default)]
    pub data: PresenceData,
    #[serde(default)]
    pub source: SourceInfo,
    #[serde(default)]
    pub icons: Option<IconFiles>,
    #[serde(default)]
    pub max_detail: Option<RendererType>,
    #[serde(default)]
    pub settings: MemorySettingsStore,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture {}", path.display()))?;
        let mut fixture: Fixture = serde_json::from_str(&raw)
            .with_context(|| format!("invalid fixture {}", path.display()))?;
        fixture.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(fixture)
    }

    pub fn context(&self, mode: Mode) -> Result<RenderContext> {
        let mut context = RenderContext::new(self.data.clone())
            .with_mode(mode)
            .with_source(self.source.clone());
        if let Some(id) = &self.application_id {
            context = context.with_application_id(id.clone());
        }
        if let Some(limit) = self.max_detail {
            context = context.with_max_detail(limit);
        }
        if let Some(icons) = &self.icons {
            context = context.with_icons(self.icon_set(icons)?);
        }
        Ok(context)
    }

    fn icon_set(&self, files: &IconFiles) -> Result<IconSet> {
        let mut icons = IconSet::new(files.theme.clone());
        if let Some(path) = &files.application {
            icons = icons.with_application(self.load_icon("application", path)?);
        }
        for (language, path) in &files.languages {
            icons = icons.with_language(language, self.load_icon(language, path)?);
        }
        if let Some(path) = &files.fallback_language {
            icons = icons.with_fallback_language(self.load_icon("fallback", path)?);
        }
        Ok(icons)
    }

    fn load_icon(&self, key: &str, path: &Path) -> Result<LocalAsset> {
        let path = self.base_dir.join(path);
        let bytes =
            fs::read(&path).with_context(|| format!("failed to read icon {}", path.display()))?;
        LocalAsset::from_bytes(key, &bytes)
            .with_context(|| format!("failed to decode icon {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat};
    use presence_core::{AssetKind, PresenceEngine};

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    fn write_png(dir: &Path, name: &str) {
        DynamicImage::new_rgba8(16, 16)
            .save_with_format(dir.join(name), ImageFormat::Png)
            .unwrap();
    }

    #[test]
    fn renders_project_fixture_with_local_icons() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("icons")).unwrap();
        write_png(&dir.path().join("icons"), "rust.png");
        let path = write(
            dir.path(),
            "fixture.json",
            r#"{
                "application_id": "782685898163617802",
                "data": {
                    "project": {"name": "demo"},
                    "file": {"name": "main.rs", "language": "Rust"}
                },
                "icons": {"languages": {"rust": "icons/rust.png"}},
                "settings": {
                    "normal": {
                        "file": {
                            "details": {"type": "fixed", "value": "Working"},
                            "state": {"type": "file_name"},
                            "large_icon": {"type": "file_language"}
                        }
                    }
                }
            }"#,
        );

        let fixture = Fixture::load(&path).unwrap();
        let context = fixture.context(Mode::Normal).unwrap();
        assert_eq!(context.specificity(), RendererType::File);

        let engine = PresenceEngine::from_env(fixture.settings).unwrap();
        let presence = engine.render(&context).unwrap();
        assert_eq!(presence.details.as_deref(), Some("Working"));
        assert_eq!(presence.state.as_deref(), Some("main.rs"));
        let image = presence.large_image.unwrap();
        assert_eq!(image.asset.kind(), AssetKind::Local);
        assert_eq!(image.asset.id(), "rust");
    }

    #[test]
    fn max_detail_and_mode_flow_into_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "fixture.json",
            r#"{
                "data": {"application": {"name": "IDE"}, "project": {"name": "demo"}},
                "max_detail": "application"
            }"#,
        );

        let context = Fixture::load(&path).unwrap().context(Mode::Preview).unwrap();
        assert_eq!(context.mode, Mode::Preview);
        assert_eq!(context.specificity(), RendererType::Application);
        assert!(context.icons.is_none());
    }

    #[test]
    fn missing_icon_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "fixture.json",
            r#"{"icons": {"application": "missing.png"}}"#,
        );

        let err = Fixture::load(&path).unwrap().context(Mode::Normal).unwrap_err();
        assert!(err.to_string().contains("missing.png"));
    }
}
