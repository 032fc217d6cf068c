//! Component expansion for Vista templates.
//!
//! This crate handles:
//! - Component registration and lookup
//! - Attribute binding and expression evaluation
//! - Dependency injection through a resolver
//! - Slot (body) injection
//! - Runaway recursion detection

mod component;
mod evaluator;
mod expander;
mod options;
mod registry;
mod resolver;

pub use component::{ComponentScope, FnComponent, MarkupComponent, ViewComponent};
pub use evaluator::{Evaluator, PathEvaluator};
pub use expander::Expander;
pub use options::{ExpandOptions, SlotScope, DEFAULT_MAX_DEPTH};
pub use registry::{ComponentBuilder, ComponentDefinition, ComponentRegistry, Dependency, PropDefinition};
pub use resolver::{NoDependencies, Resolver};

use vista_core::{ExpandError, RenderContext};

/// Expand all component tags in `source` using the provided registry.
///
/// Uses the default [`PathEvaluator`], no dependency resolver, and default
/// options. See [`Expander`] to supply your own collaborators.
pub fn expand(
    source: &str,
    context: &RenderContext,
    registry: &ComponentRegistry,
) -> Result<String, ExpandError> {
    let options = ExpandOptions::default();
    Expander::new(registry, &PathEvaluator, &NoDependencies, &options).render(source, context)
}
