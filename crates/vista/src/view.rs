//! View engine and per-render handles.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tracing::debug;
use vista_core::{Injected, RenderContext, Value, ViewError};
use vista_expander::{
    ComponentDefinition, ComponentRegistry, Dependency, Evaluator, ExpandOptions, Expander,
    NoDependencies, PathEvaluator, Resolver,
};

use crate::components;
use crate::container::Container;

struct Shared {
    registry: ComponentRegistry,
    evaluator: Box<dyn Evaluator>,
    resolver: Box<dyn Resolver>,
    options: ExpandOptions,
}

/// Renders views against a fixed set of components.
///
/// Cheap to clone and safe to share between threads; every render owns
/// its own contexts.
#[derive(Clone)]
pub struct ViewEngine {
    shared: Arc<Shared>,
}

impl ViewEngine {
    pub fn builder() -> ViewEngineBuilder {
        ViewEngineBuilder::default()
    }

    /// Start a view over `source`.
    pub fn view(&self, source: impl Into<String>) -> ViewHandle {
        ViewHandle {
            engine: self.clone(),
            source: source.into(),
            context: RenderContext::new(),
            services: Container::new(),
        }
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.shared.registry
    }

    pub fn options(&self) -> &ExpandOptions {
        &self.shared.options
    }
}

impl Default for ViewEngine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for ViewEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewEngine")
            .field("registry", &self.shared.registry)
            .field("options", &self.shared.options)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ViewEngine`].
pub struct ViewEngineBuilder {
    registry: ComponentRegistry,
    evaluator: Box<dyn Evaluator>,
    resolver: Box<dyn Resolver>,
    options: ExpandOptions,
}

impl Default for ViewEngineBuilder {
    fn default() -> Self {
        Self {
            registry: ComponentRegistry::new(),
            evaluator: Box::new(PathEvaluator),
            resolver: Box::new(NoDependencies),
            options: ExpandOptions::default(),
        }
    }
}

impl ViewEngineBuilder {
    /// Replace the registry. Components added so far are dropped.
    pub fn registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn component(mut self, definition: ComponentDefinition) -> Self {
        self.registry.register(definition);
        self
    }

    pub fn with_builtin_components(mut self) -> Self {
        components::register(&mut self.registry);
        self
    }

    pub fn evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    pub fn resolver(mut self, resolver: impl Resolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Resolve injected dependencies from `container`.
    pub fn container(self, container: Container) -> Self {
        self.resolver(container)
    }

    pub fn options(mut self, options: ExpandOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> ViewEngine {
        ViewEngine {
            shared: Arc::new(Shared {
                registry: self.registry,
                evaluator: self.evaluator,
                resolver: self.resolver,
                options: self.options,
            }),
        }
    }
}

/// A view waiting to be rendered, with the data bound so far.
#[derive(Clone)]
pub struct ViewHandle {
    engine: ViewEngine,
    source: String,
    context: RenderContext,
    services: Container,
}

impl ViewHandle {
    /// Bind a root variable, overwriting an earlier one of the same name.
    pub fn data(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(name, value);
        self
    }

    pub fn with_data<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.context.extend(vars);
        self
    }

    /// Provide an instance for this render only, such as the current
    /// request's session. Takes precedence over the engine's resolver.
    pub fn service<T: Any + Send + Sync>(mut self, instance: Arc<T>) -> Self {
        self.services.singleton(instance);
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Expand every component in the view. Rendering twice with the same
    /// data gives the same output.
    pub fn render(&self) -> Result<String, ViewError> {
        let shared = &self.engine.shared;
        debug!(source_len = self.source.len(), vars = self.context.len(), "rendering view");

        let resolver = Layered {
            local: &self.services,
            fallback: shared.resolver.as_ref(),
        };
        let expander = Expander::new(&shared.registry, shared.evaluator.as_ref(), &resolver, &shared.options);
        let output = expander.render(&self.source, &self.context)?;

        debug!(output_len = output.len(), "rendered view");
        Ok(output)
    }
}

impl fmt::Debug for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewHandle")
            .field("source", &self.source)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Per-render services in front of the engine's resolver.
struct Layered<'a> {
    local: &'a Container,
    fallback: &'a dyn Resolver,
}

impl Resolver for Layered<'_> {
    fn resolve(&self, dependency: &Dependency) -> Option<Injected> {
        self.local
            .resolve(dependency)
            .or_else(|| self.fallback.resolve(dependency))
    }
}

/// Start a view over `source` with `engine`.
pub fn view(engine: &ViewEngine, source: impl Into<String>) -> ViewHandle {
    engine.view(source)
}
