//! Renderer variants and their selection from context specificity.
use presence_assets::{AssetHandle, SharedImageTransport, WebAsset};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use crate::context::{ApplicationData, FileData, ProjectData, RenderContext, RenderView};
use crate::presence::{Button, Image, RichPresence};
use crate::resolve::{TemplateScope, resolve, resolve_text};
use crate::settings::PresenceSettings;
use crate::values::{IconValue, TemplateValue, TextValue, TimeValue};

/// How much contextual detail a renderer shows, ordered from least to most specific.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RendererType {
    #[default]
    None,
    Idle,
    Application,
    Project,
    File,
}

impl RendererType {
    pub const ALL: [RendererType; 5] = [
        RendererType::None,
        RendererType::Idle,
        RendererType::Application,
        RendererType::Project,
        RendererType::File,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RendererType::None => "none",
            RendererType::Idle => "idle",
            RendererType::Application => "application",
            RendererType::Project => "project",
            RendererType::File => "file",
        }
    }

    /// Whether a renderer of this type can stand in where `expected` is required.
    ///
    /// Application, Project and File form a chain where a more specific renderer satisfies a
    /// less specific expectation. Idle and None only satisfy themselves.
    pub fn satisfies(self, expected: RendererType) -> bool {
        match expected {
            RendererType::Application | RendererType::Project | RendererType::File => {
                self >= expected
            }
            RendererType::Idle | RendererType::None => self == expected,
        }
    }

    pub fn clamp_to(self, limit: RendererType) -> RendererType {
        self.min(limit)
    }

    /// Next variant to try when this one's data is missing.
    fn fallback(self) -> Option<RendererType> {
        match self {
            RendererType::File => Some(RendererType::Project),
            RendererType::Project => Some(RendererType::Application),
            RendererType::Application | RendererType::Idle => Some(RendererType::None),
            RendererType::None => None,
        }
    }
}

type RendererFactory = for<'a> fn(&'a RenderContext) -> Option<Renderer<'a>>;

const FACTORIES: [(RendererType, RendererFactory); 5] = [
    (RendererType::None, none_renderer),
    (RendererType::Idle, idle_renderer),
    (RendererType::Application, application_renderer),
    (RendererType::Project, project_renderer),
    (RendererType::File, file_renderer),
];

fn factory(kind: RendererType) -> RendererFactory {
    FACTORIES
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .map(|(_, factory)| *factory)
        .unwrap_or(none_renderer)
}

fn none_renderer(_context: &RenderContext) -> Option<Renderer<'_>> {
    None
}

fn idle_renderer(context: &RenderContext) -> Option<Renderer<'_>> {
    context.data.idle.then(|| Renderer {
        kind: RendererType::Idle,
        view: RenderView {
            project: None,
            file: None,
            ..RenderView::full(context)
        },
    })
}

fn application_renderer(context: &RenderContext) -> Option<Renderer<'_>> {
    let application = context.data.application.as_ref()?;
    Some(Renderer {
        kind: RendererType::Application,
        view: RenderView {
            context,
            application: Some(application),
            project: None,
            file: None,
        },
    })
}

fn project_renderer(context: &RenderContext) -> Option<Renderer<'_>> {
    let project = context.data.project.as_ref()?;
    Some(Renderer {
        kind: RendererType::Project,
        view: RenderView {
            project: Some(project),
            file: None,
            ..RenderView::full(context)
        },
    })
}

fn file_renderer(context: &RenderContext) -> Option<Renderer<'_>> {
    if context.data.project.is_none() || context.data.file.is_none() {
        return None;
    }
    Some(Renderer {
        kind: RendererType::File,
        view: RenderView::full(context),
    })
}

/// Picks the most specific renderer whose required data is present.
///
/// Starts at the context's (clamped) specificity and walks towards `None`. `None` never
/// produces a renderer.
pub fn select_renderer(context: &RenderContext) -> Option<Renderer<'_>> {
    let mut kind = Some(context.specificity());
    while let Some(current) = kind {
        if let Some(renderer) = factory(current)(context) {
            return Some(renderer);
        }
        kind = current.fallback();
    }
    None
}

/// Shared inputs for resolving icons.
#[derive(Clone)]
pub struct RenderResources<'a> {
    pub transport: &'a SharedImageTransport,
    pub icon_size: Option<u32>,
    pub party_id: Option<&'a str>,
}

/// A renderer bound to the data of one context.
///
/// Fields and templates resolve against [`Renderer::view`], which hides whatever is more
/// specific than the renderer's kind.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    kind: RendererType,
    view: RenderView<'a>,
}

impl<'a> Renderer<'a> {
    pub fn kind(&self) -> RendererType {
        self.kind
    }

    pub fn context(&self) -> &'a RenderContext {
        self.view.context
    }

    pub fn view(&self) -> RenderView<'a> {
        self.view
    }

    pub fn application(&self) -> Option<&'a ApplicationData> {
        self.view.application
    }

    pub fn project(&self) -> Option<&'a ProjectData> {
        self.view.project
    }

    pub fn file(&self) -> Option<&'a FileData> {
        self.view.file
    }

    /// Buttons link to project resources and are only shown by project-level renderers.
    pub fn shows_buttons(&self) -> bool {
        self.kind.satisfies(RendererType::Project)
    }

    pub fn render(
        &self,
        settings: &PresenceSettings,
        resources: &RenderResources<'_>,
    ) -> RichPresence {
        let context = self.view.context;
        debug!(
            renderer = self.kind.as_str(),
            mode = ?context.mode,
            data = ?context.data,
            "rendering presence"
        );
        debug!(
            themes = ?context.source.themes,
            languages = ?context.source.languages,
            "presence source"
        );
        if context.icons.is_none() {
            debug!("render context has no icon set");
        }

        let scope = TemplateScope::for_view(self.view);
        self.render_with_scope(settings, resources, &scope)
    }

    /// Renders with a caller-provided template scope.
    pub fn render_with_scope(
        &self,
        settings: &PresenceSettings,
        resources: &RenderResources<'_>,
        scope: &TemplateScope<'_>,
    ) -> RichPresence {
        let view = &self.view;

        let details = resolve_text(
            settings.details.as_ref(),
            settings.details_custom.as_ref(),
            view,
            scope,
        );
        let state = resolve_text(
            settings.state.as_ref(),
            settings.state_custom.as_ref(),
            view,
            scope,
        );
        let start_timestamp = resolve(
            settings.start_timestamp.as_ref(),
            None,
            view,
            scope,
            |_| None,
        )
        .and_then(timestamp_from_millis);

        let large_image = self.resolve_image(
            ImageSlot {
                icon: settings.large_icon.as_ref(),
                icon_custom: settings.large_icon_custom.as_ref(),
                caption: settings.large_icon_text.as_ref(),
                caption_custom: settings.large_icon_text_custom.as_ref(),
            },
            resources,
            scope,
        );
        let small_image = self.resolve_image(
            ImageSlot {
                icon: settings.small_icon.as_ref(),
                icon_custom: settings.small_icon_custom.as_ref(),
                caption: settings.small_icon_text.as_ref(),
                caption_custom: settings.small_icon_text_custom.as_ref(),
            },
            resources,
            scope,
        );

        let (button1, button2) = if self.shows_buttons() {
            (
                settings.button1.clone().filter(Button::is_complete),
                settings.button2.clone().filter(Button::is_complete),
            )
        } else {
            (None, None)
        };

        RichPresence::builder(view.context.application_id.clone())
            .details(details)
            .state(state)
            .start_timestamp(start_timestamp)
            .large_image(large_image)
            .small_image(small_image)
            .button1(button1)
            .button2(button2)
            .party_id(resources.party_id.map(str::to_string))
            .build()
    }

    /// Resolves the asset first; the caption is only resolved when the asset produces an image.
    fn resolve_image(
        &self,
        slot: ImageSlot<'_>,
        resources: &RenderResources<'_>,
        scope: &TemplateScope<'_>,
    ) -> Option<Image> {
        let asset = resolve(slot.icon, slot.icon_custom, &self.view, scope, |url| {
            Some(AssetHandle::new(WebAsset::new(
                url,
                resources.transport.clone(),
            )))
        })?;
        asset.produce_image(resources.icon_size)?;

        let caption = resolve_text(slot.caption, slot.caption_custom, &self.view, scope);
        Some(Image::new(asset, caption))
    }
}

struct ImageSlot<'s> {
    icon: Option<&'s IconValue>,
    icon_custom: Option<&'s TemplateValue>,
    caption: Option<&'s TextValue>,
    caption_custom: Option<&'s TemplateValue>,
}

fn timestamp_from_millis(millis: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
}
