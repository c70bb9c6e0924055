//! Custom templates evaluated against a per-render context.
//!
//! Templates use Handlebars syntax in strict mode: referencing a variable that is not present
//! in the context is an error rather than an empty string. Output is not HTML-escaped since
//! rendered values end up in plain text fields and URLs.
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

const TEMPLATE_NAME: &str = "custom";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to compile template: {0}")]
    Compile(#[source] Box<handlebars::TemplateError>),
    #[error("failed to render template: {0}")]
    Render(#[source] Box<handlebars::RenderError>),
    #[error("failed to build template context: {0}")]
    Context(#[source] serde_json::Error),
}

pub fn hb_registry() -> Handlebars<'static> {
    let mut h = Handlebars::new();
    h.set_strict_mode(true);
    h.register_escape_fn(handlebars::no_escape);
    h
}

/// Data exposed to custom templates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateContext(Value);

impl TemplateContext {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_serialize<T: Serialize>(data: &T) -> Result<Self, TemplateError> {
        serde_json::to_value(data)
            .map(Self)
            .map_err(TemplateError::Context)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// A compiled template, ready to execute any number of times.
pub struct CustomTemplate {
    source: String,
    registry: Handlebars<'static>,
}

impl CustomTemplate {
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        let mut registry = hb_registry();
        registry
            .register_template_string(TEMPLATE_NAME, source)
            .map_err(|err| TemplateError::Compile(Box::new(err)))?;
        Ok(Self {
            source: source.to_string(),
            registry,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn execute(&self, context: &TemplateContext) -> Result<String, TemplateError> {
        self.registry
            .render(TEMPLATE_NAME, context.as_value())
            .map_err(|err| TemplateError::Render(Box::new(err)))
    }
}

impl std::fmt::Debug for CustomTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomTemplate")
            .field("source", &self.source)
            .finish()
    }
}
