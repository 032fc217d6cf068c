//! Component implementations.
//!
//! A component turns its bound inputs into template source. The expander
//! then scans and expands that source like any other markup, so a
//! component may use other components, echoes, `@attributes`, and
//! `<x-slot />` in what it returns.

use std::any::Any;
use std::borrow::Cow;
use std::sync::Arc;

use vista_core::{AttributeBag, ExpandError, RenderContext, Value};

/// A renderable component.
pub trait ViewComponent: Send + Sync {
    /// Produce the template source for one instantiation.
    fn render<'s>(&'s self, scope: &ComponentScope<'_>) -> Result<Cow<'s, str>, ExpandError>;
}

/// What a component sees while rendering: its own fresh context.
#[derive(Debug, Clone, Copy)]
pub struct ComponentScope<'a> {
    tag_name: &'a str,
    context: &'a RenderContext,
    has_body: bool,
}

impl<'a> ComponentScope<'a> {
    pub fn new(tag_name: &'a str, context: &'a RenderContext, has_body: bool) -> Self {
        Self {
            tag_name,
            context,
            has_body,
        }
    }

    pub fn tag_name(&self) -> &'a str {
        self.tag_name
    }

    pub fn context(&self) -> &'a RenderContext {
        self.context
    }

    /// Get a bound prop or attribute value.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.context.get(name)
    }

    /// A bound value as text, empty when absent.
    pub fn text(&self, name: &str) -> String {
        self.get(name).map(ToString::to_string).unwrap_or_default()
    }

    /// Attributes that were not declared as props.
    pub fn attributes(&self) -> &'a AttributeBag {
        self.context.attributes()
    }

    /// Whether the caller passed body content.
    pub fn has_body(&self) -> bool {
        self.has_body
    }

    /// An injected dependency, downcast to its concrete type.
    pub fn service<T: Any + Send + Sync>(&self, parameter: &str) -> Result<Arc<T>, ExpandError> {
        self.context
            .service::<T>(parameter)
            .ok_or_else(|| ExpandError::DependencyResolution {
                component: self.tag_name.to_string(),
                parameter: parameter.to_string(),
                type_name: std::any::type_name::<T>(),
            })
    }
}

/// A component whose template is fixed markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupComponent {
    source: String,
}

impl MarkupComponent {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl ViewComponent for MarkupComponent {
    fn render<'s>(&'s self, _scope: &ComponentScope<'_>) -> Result<Cow<'s, str>, ExpandError> {
        Ok(Cow::Borrowed(&self.source))
    }
}

/// A component backed by a closure.
pub struct FnComponent<F> {
    render: F,
}

impl<F> FnComponent<F>
where
    F: Fn(&ComponentScope<'_>) -> Result<String, ExpandError> + Send + Sync,
{
    pub fn new(render: F) -> Self {
        Self { render }
    }
}

impl<F> ViewComponent for FnComponent<F>
where
    F: Fn(&ComponentScope<'_>) -> Result<String, ExpandError> + Send + Sync,
{
    fn render<'s>(&'s self, scope: &ComponentScope<'_>) -> Result<Cow<'s, str>, ExpandError> {
        (self.render)(scope).map(Cow::Owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Clock(&'static str);

    #[test]
    fn test_markup_component_borrows_source() {
        let component = MarkupComponent::new("<div></div>");
        let context = RenderContext::new();
        let scope = ComponentScope::new("x-my", &context, false);
        let rendered = component.render(&scope).unwrap();
        assert!(matches!(rendered, Cow::Borrowed("<div></div>")));
    }

    #[test]
    fn test_fn_component_reads_scope() {
        let component = FnComponent::new(|scope: &ComponentScope<'_>| {
            let clock = scope.service::<Clock>("clock")?;
            Ok(format!("{} at {}", scope.text("title"), clock.0))
        });

        let mut context = RenderContext::new();
        context.insert("title", "Standup");
        context.insert_service("clock", Arc::new(Clock("9:00")));
        let scope = ComponentScope::new("x-event", &context, true);

        assert_eq!(component.render(&scope).unwrap(), "Standup at 9:00");
        assert!(scope.has_body());
    }

    #[test]
    fn test_missing_service_is_dependency_error() {
        let context = RenderContext::new();
        let scope = ComponentScope::new("x-event", &context, false);
        let err = scope.service::<Clock>("clock").unwrap_err();
        assert!(matches!(
            err,
            ExpandError::DependencyResolution { ref component, ref parameter, .. }
                if component == "x-event" && parameter == "clock"
        ));
    }
}
