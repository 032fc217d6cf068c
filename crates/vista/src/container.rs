//! Type-keyed dependency container.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use vista_core::Injected;
use vista_expander::{Dependency, Resolver};

/// Instances keyed by their concrete type.
///
/// Components declare what they need with `ComponentBuilder::inject`; the
/// container hands out the registered instance of that type.
#[derive(Clone, Default)]
pub struct Container {
    instances: HashMap<TypeId, Injected>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `instance`, replacing any instance of the same type.
    pub fn register<T: Any + Send + Sync>(&mut self, instance: T) -> &mut Self {
        self.singleton(Arc::new(instance))
    }

    /// Register an already shared instance.
    pub fn singleton<T: Any + Send + Sync>(&mut self, instance: Arc<T>) -> &mut Self {
        self.instances.insert(TypeId::of::<T>(), instance);
        self
    }

    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.instances
            .get(&TypeId::of::<T>())
            .and_then(|instance| Arc::clone(instance).downcast::<T>().ok())
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.instances.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Resolver for Container {
    fn resolve(&self, dependency: &Dependency) -> Option<Injected> {
        self.instances.get(&dependency.type_id).cloned()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("instances", &self.instances.len())
            .finish()
    }
}
