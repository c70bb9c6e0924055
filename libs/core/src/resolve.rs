//! The field resolution protocol shared by every presence field.
use once_cell::unsync::OnceCell;
use presence_templates::TemplateContext;
use tracing::debug;

use crate::context::RenderView;
use crate::values::{Resolution, TemplateValue, ValueDefinition};

/// Template context for one render call, built on first use and shared afterwards.
pub struct TemplateScope<'a> {
    supplier: Box<dyn Fn() -> TemplateContext + 'a>,
    context: OnceCell<TemplateContext>,
}

impl<'a> TemplateScope<'a> {
    pub fn new(supplier: impl Fn() -> TemplateContext + 'a) -> Self {
        Self {
            supplier: Box::new(supplier),
            context: OnceCell::new(),
        }
    }

    /// Builds templates against what `view` exposes, never the full context.
    pub fn for_view(view: RenderView<'a>) -> Self {
        Self::new(move || view.template_context())
    }

    pub fn get(&self) -> &TemplateContext {
        self.context.get_or_init(|| (self.supplier)())
    }

    pub fn is_built(&self) -> bool {
        self.context.get().is_some()
    }

    /// Executes `template`, returning the trimmed output or `None` when it fails or renders
    /// blank.
    pub fn execute(&self, template: &TemplateValue) -> Option<String> {
        let compiled = match template.compile() {
            Ok(compiled) => compiled,
            Err(err) => {
                debug!(template = template.source(), error = %err, "custom template rejected");
                return None;
            }
        };
        let rendered = match compiled.execute(self.get()) {
            Ok(rendered) => rendered,
            Err(err) => {
                debug!(template = template.source(), error = %err, "custom template failed");
                return None;
            }
        };

        let trimmed = rendered.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Resolves one field.
///
/// An absent definition or `Empty` omits the field, a concrete value is used as is, and
/// `Custom` runs the paired template through `from_custom`.
pub fn resolve<D, T>(
    definition: Option<&D>,
    custom: Option<&TemplateValue>,
    view: &RenderView<'_>,
    scope: &TemplateScope<'_>,
    from_custom: impl FnOnce(String) -> Option<T>,
) -> Option<T>
where
    D: ValueDefinition<Value = T>,
{
    match definition?.evaluate(view) {
        Resolution::Empty => None,
        Resolution::Value(value) => Some(value),
        Resolution::Custom => custom
            .and_then(|template| scope.execute(template))
            .and_then(from_custom),
    }
}

pub fn resolve_text<D>(
    definition: Option<&D>,
    custom: Option<&TemplateValue>,
    view: &RenderView<'_>,
    scope: &TemplateScope<'_>,
) -> Option<String>
where
    D: ValueDefinition<Value = String>,
{
    resolve(definition, custom, view, scope, Some)
}
