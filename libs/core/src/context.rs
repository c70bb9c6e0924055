//! Per-render snapshot supplied by the host.
use std::collections::BTreeMap;

use presence_assets::AssetHandle;
use presence_templates::TemplateContext;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::renderer::RendererType;

/// Selects which stored settings apply to a render.
///
/// `Preview` reads pending settings so a user can try them out without affecting the live
/// presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Normal,
    Preview,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    #[serde(default)]
    pub themes: Option<Vec<String>>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationData {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub started_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub opened_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileData {
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub opened_at: Option<i64>,
}

/// What the host currently knows about the user's activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceData {
    #[serde(default)]
    pub idle: bool,
    #[serde(default)]
    pub application: Option<ApplicationData>,
    #[serde(default)]
    pub project: Option<ProjectData>,
    #[serde(default)]
    pub file: Option<FileData>,
}

impl PresenceData {
    /// The most specific renderer the available data supports.
    ///
    /// An idle user always maps to [`RendererType::Idle`], whatever else is open.
    pub fn specificity(&self) -> RendererType {
        if self.idle {
            return RendererType::Idle;
        }
        match (&self.application, &self.project, &self.file) {
            (_, Some(_), Some(_)) => RendererType::File,
            (_, Some(_), None) => RendererType::Project,
            (Some(_), None, _) => RendererType::Application,
            (None, None, _) => RendererType::None,
        }
    }
}

/// Icons available for the active theme.
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    theme: String,
    application: Option<AssetHandle>,
    languages: BTreeMap<String, AssetHandle>,
    fallback_language: Option<AssetHandle>,
}

impl IconSet {
    pub fn new(theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            ..Default::default()
        }
    }

    pub fn with_application(mut self, asset: impl Into<AssetHandle>) -> Self {
        self.application = Some(asset.into());
        self
    }

    /// Registers the icon for a language. Lookups are case-insensitive.
    pub fn with_language(mut self, language: &str, asset: impl Into<AssetHandle>) -> Self {
        self.languages.insert(language.to_lowercase(), asset.into());
        self
    }

    /// Icon used for languages without a dedicated entry.
    pub fn with_fallback_language(mut self, asset: impl Into<AssetHandle>) -> Self {
        self.fallback_language = Some(asset.into());
        self
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn application(&self) -> Option<&AssetHandle> {
        self.application.as_ref()
    }

    pub fn language(&self, language: &str) -> Option<&AssetHandle> {
        self.languages
            .get(&language.to_lowercase())
            .or(self.fallback_language.as_ref())
    }

    pub fn fallback_language(&self) -> Option<&AssetHandle> {
        self.fallback_language.as_ref()
    }
}

/// Immutable input of a single render call.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub mode: Mode,
    pub application_id: Option<String>,
    pub source: SourceInfo,
    pub icons: Option<IconSet>,
    pub data: PresenceData,
    /// Caps how much detail is shown, e.g. `Project` hides file names.
    pub max_detail: Option<RendererType>,
}

impl RenderContext {
    pub fn new(data: PresenceData) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }

    pub fn with_source(mut self, source: SourceInfo) -> Self {
        self.source = source;
        self
    }

    pub fn with_icons(mut self, icons: IconSet) -> Self {
        self.icons = Some(icons);
        self
    }

    pub fn with_max_detail(mut self, limit: RendererType) -> Self {
        self.max_detail = Some(limit);
        self
    }

    /// Specificity of the data, clamped to [`RenderContext::max_detail`].
    pub fn specificity(&self) -> RendererType {
        let detected = self.data.specificity();
        match self.max_detail {
            Some(limit) => detected.clamp_to(limit),
            None => detected,
        }
    }

    /// Template context over all of the context's data.
    pub fn template_context(&self) -> TemplateContext {
        RenderView::full(self).template_context()
    }
}

/// The part of a context a renderer exposes to its fields.
///
/// Values and templates only see data through a view, so a less specific renderer cannot leak
/// project or file details.
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    pub context: &'a RenderContext,
    pub application: Option<&'a ApplicationData>,
    pub project: Option<&'a ProjectData>,
    pub file: Option<&'a FileData>,
}

impl<'a> RenderView<'a> {
    /// Exposes everything the context holds.
    pub fn full(context: &'a RenderContext) -> Self {
        Self {
            context,
            application: context.data.application.as_ref(),
            project: context.data.project.as_ref(),
            file: context.data.file.as_ref(),
        }
    }

    pub fn icons(&self) -> Option<&'a IconSet> {
        self.context.icons.as_ref()
    }

    /// Builds the value custom templates are evaluated against.
    ///
    /// Hidden and absent data is exposed as `null` so templates can test it with `{{#if}}`.
    pub fn template_context(&self) -> TemplateContext {
        let context = self.context;
        let view = TemplateView {
            mode: context.mode,
            application_id: context.application_id.as_deref(),
            idle: context.data.idle,
            application: self.application,
            project: self.project,
            file: self.file,
            theme: context.icons.as_ref().map(IconSet::theme),
            themes: context.source.themes.as_deref().unwrap_or_default(),
            languages: context.source.languages.as_deref().unwrap_or_default(),
        };
        TemplateContext::from_serialize(&view).unwrap_or_else(|err| {
            warn!(error = %err, "failed to build template context");
            TemplateContext::default()
        })
    }
}

#[derive(Serialize)]
struct TemplateView<'a> {
    mode: Mode,
    application_id: Option<&'a str>,
    idle: bool,
    application: Option<&'a ApplicationData>,
    project: Option<&'a ProjectData>,
    file: Option<&'a FileData>,
    theme: Option<&'a str>,
    themes: &'a [String],
    languages: &'a [String],
}
