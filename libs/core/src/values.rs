//! User-configured field definitions and what they evaluate to.
use presence_assets::AssetHandle;
use presence_templates::{CustomTemplate, TemplateError};
use serde::{Deserialize, Serialize};

use crate::context::RenderView;

/// Outcome of evaluating a definition against a renderer's view.
///
/// `Custom` defers to the field's paired [`TemplateValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    Empty,
    Custom,
    Value(T),
}

pub type TextResult = Resolution<String>;
pub type IconResult = Resolution<AssetHandle>;
/// Epoch milliseconds. Time definitions never evaluate to `Custom`.
pub type TimeResult = Resolution<i64>;

pub trait ValueDefinition {
    type Value;

    fn evaluate(&self, view: &RenderView<'_>) -> Resolution<Self::Value>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TextValue {
    Hide,
    Fixed(String),
    ApplicationName,
    ApplicationVersion,
    ProjectName,
    ProjectDescription,
    FileName,
    FilePath,
    FileLanguage,
    Custom,
}

impl ValueDefinition for TextValue {
    type Value = String;

    fn evaluate(&self, view: &RenderView<'_>) -> TextResult {
        let (application, project, file) = (view.application, view.project, view.file);

        let text = match self {
            TextValue::Hide => return Resolution::Empty,
            TextValue::Custom => return Resolution::Custom,
            TextValue::Fixed(text) => Some(text.as_str()),
            TextValue::ApplicationName => application.map(|a| a.name.as_str()),
            TextValue::ApplicationVersion => application.and_then(|a| a.version.as_deref()),
            TextValue::ProjectName => project.map(|p| p.name.as_str()),
            TextValue::ProjectDescription => project.and_then(|p| p.description.as_deref()),
            TextValue::FileName => file.map(|f| f.name.as_str()),
            TextValue::FilePath => file.and_then(|f| f.path.as_deref()),
            TextValue::FileLanguage => file.and_then(|f| f.language.as_deref()),
        };

        match text.map(str::trim).filter(|text| !text.is_empty()) {
            Some(text) => Resolution::Value(text.to_string()),
            None => Resolution::Empty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IconValue {
    Hide,
    Application,
    FileLanguage,
    /// The paired template renders an image URL.
    Custom,
}

impl ValueDefinition for IconValue {
    type Value = AssetHandle;

    fn evaluate(&self, view: &RenderView<'_>) -> IconResult {
        let icons = match self {
            IconValue::Hide => return Resolution::Empty,
            IconValue::Custom => return Resolution::Custom,
            IconValue::Application | IconValue::FileLanguage => view.icons(),
        };
        let Some(icons) = icons else {
            return Resolution::Empty;
        };

        let asset = match self {
            IconValue::Application => icons.application(),
            IconValue::FileLanguage => view.file.and_then(|file| match file.language.as_deref() {
                Some(language) => icons.language(language),
                None => icons.fallback_language(),
            }),
            IconValue::Hide | IconValue::Custom => None,
        };

        match asset {
            Some(asset) => Resolution::Value(asset.clone()),
            None => Resolution::Empty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimeValue {
    Hide,
    ApplicationStart,
    ProjectOpened,
    FileOpened,
}

impl ValueDefinition for TimeValue {
    type Value = i64;

    fn evaluate(&self, view: &RenderView<'_>) -> TimeResult {
        let millis = match self {
            TimeValue::Hide => None,
            TimeValue::ApplicationStart => view.application.and_then(|a| a.started_at),
            TimeValue::ProjectOpened => view.project.and_then(|p| p.opened_at),
            TimeValue::FileOpened => view.file.and_then(|f| f.opened_at),
        };
        millis.map_or(Resolution::Empty, Resolution::Value)
    }
}

/// Template source paired with a definition, used when the definition is `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateValue {
    source: String,
}

impl TemplateValue {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn compile(&self) -> Result<CustomTemplate, TemplateError> {
        CustomTemplate::compile(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{
        ApplicationData, FileData, IconSet, PresenceData, ProjectData, RenderContext,
    };
    use image::DynamicImage;
    use presence_assets::LocalAsset;

    fn context() -> RenderContext {
        RenderContext::new(PresenceData {
            idle: false,
            application: Some(ApplicationData {
                name: "IntelliJ IDEA".into(),
                version: Some("2024.1".into()),
                started_at: Some(1_000),
            }),
            project: Some(ProjectData {
                name: "demo".into(),
                description: Some("   ".into()),
                opened_at: Some(2_000),
            }),
            file: Some(FileData {
                name: "main.rs".into(),
                path: Some("src/main.rs".into()),
                language: Some("Rust".into()),
                opened_at: None,
            }),
        })
    }

    fn icon(key: &str) -> LocalAsset {
        LocalAsset::new(key, DynamicImage::new_rgba8(1, 1))
    }

    #[test]
    fn text_values_read_view_data() {
        let ctx = context();
        let view = RenderView::full(&ctx);
        assert_eq!(
            TextValue::ApplicationName.evaluate(&view),
            Resolution::Value("IntelliJ IDEA".into())
        );
        assert_eq!(TextValue::ProjectName.evaluate(&view), Resolution::Value("demo".into()));
        assert_eq!(
            TextValue::FilePath.evaluate(&view),
            Resolution::Value("src/main.rs".into())
        );
        assert_eq!(TextValue::FileLanguage.evaluate(&view), Resolution::Value("Rust".into()));
        assert_eq!(TextValue::Custom.evaluate(&view), Resolution::Custom);
        assert_eq!(TextValue::Hide.evaluate(&view), Resolution::Empty);
    }

    #[test]
    fn blank_text_is_empty() {
        let ctx = context();
        let view = RenderView::full(&ctx);
        assert_eq!(TextValue::ProjectDescription.evaluate(&view), Resolution::Empty);
        assert_eq!(TextValue::Fixed("  ".into()).evaluate(&view), Resolution::Empty);
    }

    #[test]
    fn missing_data_is_empty() {
        let ctx = RenderContext::default();
        let view = RenderView::full(&ctx);
        assert_eq!(TextValue::FileName.evaluate(&view), Resolution::Empty);
        assert_eq!(TimeValue::ApplicationStart.evaluate(&view), Resolution::Empty);
    }

    #[test]
    fn hidden_data_is_empty() {
        let ctx = context();
        let view = RenderView {
            project: None,
            file: None,
            ..RenderView::full(&ctx)
        };
        assert_eq!(TextValue::FileName.evaluate(&view), Resolution::Empty);
        assert_eq!(TextValue::ProjectName.evaluate(&view), Resolution::Empty);
        assert_eq!(TimeValue::ProjectOpened.evaluate(&view), Resolution::Empty);
        assert_eq!(
            TextValue::ApplicationName.evaluate(&view),
            Resolution::Value("IntelliJ IDEA".into())
        );
    }

    #[test]
    fn time_values_read_timestamps() {
        let ctx = context();
        let view = RenderView::full(&ctx);
        assert_eq!(TimeValue::ApplicationStart.evaluate(&view), Resolution::Value(1_000));
        assert_eq!(TimeValue::ProjectOpened.evaluate(&view), Resolution::Value(2_000));
        assert_eq!(TimeValue::FileOpened.evaluate(&view), Resolution::Empty);
        assert_eq!(TimeValue::Hide.evaluate(&view), Resolution::Empty);
    }

    #[test]
    fn icon_values_need_an_icon_set() {
        let ctx = context();
        let view = RenderView::full(&ctx);
        assert_eq!(IconValue::Application.evaluate(&view), Resolution::Empty);
        assert_eq!(IconValue::Custom.evaluate(&view), Resolution::Custom);

        let ctx = ctx.with_icons(
            IconSet::new("classic")
                .with_application(icon("idea"))
                .with_language("rust", icon("rust")),
        );
        let view = RenderView::full(&ctx);
        let Resolution::Value(app) = IconValue::Application.evaluate(&view) else {
            panic!("application icon expected");
        };
        assert_eq!(app.id(), "idea");
        let Resolution::Value(lang) = IconValue::FileLanguage.evaluate(&view) else {
            panic!("language icon expected");
        };
        assert_eq!(lang.id(), "rust");
    }

    #[test]
    fn file_without_language_uses_fallback_icon() {
        let mut ctx = context().with_icons(
            IconSet::new("classic")
                .with_language("rust", icon("rust"))
                .with_fallback_language(icon("text")),
        );
        if let Some(file) = ctx.data.file.as_mut() {
            file.language = None;
        }

        let view = RenderView::full(&ctx);
        let Resolution::Value(asset) = IconValue::FileLanguage.evaluate(&view) else {
            panic!("fallback icon expected");
        };
        assert_eq!(asset.id(), "text");
    }

    #[test]
    fn hidden_file_has_no_language_icon() {
        let ctx =
            context().with_icons(IconSet::new("classic").with_fallback_language(icon("text")));
        let view = RenderView {
            file: None,
            ..RenderView::full(&ctx)
        };
        assert_eq!(IconValue::FileLanguage.evaluate(&view), Resolution::Empty);
    }

    #[test]
    fn definitions_deserialize_from_tagged_json() {
        let fixed: TextValue =
            serde_json::from_str(r#"{"type":"fixed","value":"Working"}"#).unwrap();
        assert_eq!(fixed, TextValue::Fixed("Working".into()));
        let icon: IconValue = serde_json::from_str(r#"{"type":"file_language"}"#).unwrap();
        assert_eq!(icon, IconValue::FileLanguage);
        let template: TemplateValue = serde_json::from_str(r#""{{project.name}}""#).unwrap();
        assert_eq!(template.source(), "{{project.name}}");
    }
}
