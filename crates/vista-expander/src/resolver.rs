//! Dependency resolution seam.

use vista_core::Injected;

use crate::registry::Dependency;

/// Supplies dependency instances for component constructors.
///
/// Called once per declared dependency each time a component is expanded.
/// Returning `None` aborts the render with `DependencyResolution`.
pub trait Resolver: Send + Sync {
    fn resolve(&self, dependency: &Dependency) -> Option<Injected>;
}

/// A resolver that never has anything to offer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDependencies;

impl Resolver for NoDependencies {
    fn resolve(&self, _dependency: &Dependency) -> Option<Injected> {
        None
    }
}
