//! Component registry for storing and looking up component definitions.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use vista_core::{ExpandError, RenderContext, Span, Value};

use crate::component::{ComponentScope, FnComponent, MarkupComponent, ViewComponent};

/// A declared component input.
#[derive(Debug, Clone, PartialEq)]
pub struct PropDefinition {
    pub name: String,
    pub default: Option<Value>,
    pub required: bool,
}

/// A constructor parameter the component needs injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Name the instance is bound under in the component's context.
    pub parameter: String,
    pub type_id: TypeId,
    pub type_name: &'static str,
}

impl Dependency {
    /// Declare a dependency on `T` bound as `parameter`.
    pub fn of<T: Any + Send + Sync>(parameter: &str) -> Self {
        Self {
            parameter: parameter.to_string(),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// Everything needed to expand one component tag.
#[derive(Clone)]
pub struct ComponentDefinition {
    /// Full tag name including the `x-` prefix.
    pub tag_name: String,
    pub props: Vec<PropDefinition>,
    pub dependencies: Vec<Dependency>,
    pub component: Arc<dyn ViewComponent>,
}

impl ComponentDefinition {
    /// Whether `name` is a declared prop.
    pub fn declares(&self, name: &str) -> bool {
        self.props.iter().any(|p| p.name == name)
    }
}

impl fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("tag_name", &self.tag_name)
            .field("props", &self.props)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// A registry of component definitions.
///
/// Populated once at startup, then only read while rendering.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: HashMap<String, ComponentDefinition>,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    /// Register a component definition, replacing any with the same tag name.
    pub fn register(&mut self, component: ComponentDefinition) {
        self.components.insert(component.tag_name.clone(), component);
    }

    /// Get a component by tag name.
    pub fn get(&self, tag_name: &str) -> Option<&ComponentDefinition> {
        self.components.get(tag_name)
    }

    /// Get a component by tag name, failing with `UnknownComponent`.
    pub fn lookup(&self, tag_name: &str, span: Span) -> Result<&ComponentDefinition, ExpandError> {
        self.get(tag_name).ok_or_else(|| ExpandError::UnknownComponent {
            name: tag_name.to_string(),
            span,
        })
    }

    /// Check if a component exists.
    pub fn contains(&self, tag_name: &str) -> bool {
        self.components.contains_key(tag_name)
    }

    /// Get all component tag names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(|s| s.as_str())
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Builder for creating component definitions.
pub struct ComponentBuilder {
    tag_name: String,
    props: Vec<PropDefinition>,
    dependencies: Vec<Dependency>,
    component: Arc<dyn ViewComponent>,
}

impl ComponentBuilder {
    /// Create a new component builder. `tag_name` is the full tag, e.g. `x-card`.
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            props: Vec::new(),
            dependencies: Vec::new(),
            component: Arc::new(MarkupComponent::new("")),
        }
    }

    /// Add a required prop.
    pub fn prop(mut self, name: &str) -> Self {
        self.props.push(PropDefinition {
            name: name.to_string(),
            default: None,
            required: true,
        });
        self
    }

    /// Add an optional prop with a default value.
    pub fn optional_prop(mut self, name: &str, default: impl Into<Value>) -> Self {
        self.props.push(PropDefinition {
            name: name.to_string(),
            default: Some(default.into()),
            required: false,
        });
        self
    }

    /// Inject an instance of `T` under `parameter`.
    pub fn inject<T: Any + Send + Sync>(mut self, parameter: &str) -> Self {
        self.dependencies.push(Dependency::of::<T>(parameter));
        self
    }

    /// Use a markup template.
    pub fn template(mut self, source: &str) -> Self {
        self.component = Arc::new(MarkupComponent::new(source));
        self
    }

    /// Use a custom component implementation.
    pub fn component(mut self, component: impl ViewComponent + 'static) -> Self {
        self.component = Arc::new(component);
        self
    }

    /// Produce the template with a closure.
    pub fn render_with<F>(self, render: F) -> Self
    where
        F: Fn(&ComponentScope<'_>) -> Result<String, ExpandError> + Send + Sync + 'static,
    {
        self.component(FnComponent::new(render))
    }

    /// Build the component definition.
    pub fn build(self) -> ComponentDefinition {
        ComponentDefinition {
            tag_name: self.tag_name,
            props: self.props,
            dependencies: self.dependencies,
            component: self.component,
        }
    }
}

/// Default values of `definition`'s props, as a fresh context.
pub(crate) fn defaults_context(definition: &ComponentDefinition) -> RenderContext {
    let mut context = RenderContext::new();
    for prop in &definition.props {
        if let Some(default) = &prop.default {
            context.insert(prop.name.clone(), default.clone());
        }
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Greeter;

    #[test]
    fn test_registry_new() {
        let registry = ComponentRegistry::new();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_register() {
        let mut registry = ComponentRegistry::new();
        let component = ComponentBuilder::new("x-button")
            .prop("label")
            .template("<button>{{ $label }}</button>")
            .build();

        registry.register(component);
        assert!(registry.contains("x-button"));
        assert!(!registry.contains("X-Button"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names().collect::<Vec<_>>(), ["x-button"]);
    }

    #[test]
    fn test_registry_lookup_unknown() {
        let registry = ComponentRegistry::new();
        let span = Span { start: 0, end: 6, line: 1, column: 1 };
        let err = registry.lookup("x-nope", span).unwrap_err();
        assert!(matches!(err, ExpandError::UnknownComponent { ref name, .. } if name == "x-nope"));
    }

    #[test]
    fn test_component_builder() {
        let component = ComponentBuilder::new("x-header")
            .prop("text")
            .optional_prop("level", 1)
            .inject::<Greeter>("greeter")
            .build();

        assert_eq!(component.tag_name, "x-header");
        assert_eq!(component.props.len(), 2);
        assert!(component.props[0].required);
        assert!(!component.props[1].required);
        assert!(component.declares("level"));
        assert!(!component.declares("class"));
        assert_eq!(component.dependencies, vec![Dependency::of::<Greeter>("greeter")]);
    }

    #[test]
    fn test_defaults_context() {
        let component = ComponentBuilder::new("x-form")
            .prop("action")
            .optional_prop("method", "post")
            .build();

        let context = defaults_context(&component);
        assert_eq!(context.get("method"), Some(&Value::from("post")));
        assert!(!context.contains("action"));
    }
}
