//! Per-render variable scopes.

use crate::value::{escape_html, Value};
use indexmap::IndexMap;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A dependency instance handed out by a resolver.
pub type Injected = Arc<dyn Any + Send + Sync>;

/// One attribute forwarded to a component's root element.
#[derive(Debug, Clone, PartialEq)]
pub enum BagAttribute {
    /// Literal text from the caller's markup. Emitted as written apart
    /// from `"`, which would end the attribute early.
    Literal(String),
    /// Result of a `:name` binding, escaped on output.
    Evaluated(Value),
    /// Bare attribute.
    Flag,
}

/// Attributes a component did not declare as props, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeBag {
    entries: IndexMap<String, BagAttribute>,
}

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: BagAttribute) {
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&BagAttribute> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BagAttribute)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as `name="value"` pairs joined by single spaces.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, (name, attr)) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(name);
            match attr {
                BagAttribute::Literal(text) => {
                    out.push_str("=\"");
                    out.push_str(&text.replace('"', "&quot;"));
                    out.push('"');
                }
                BagAttribute::Evaluated(value) => {
                    out.push_str("=\"");
                    out.push_str(&escape_html(&value.to_string()));
                    out.push('"');
                }
                BagAttribute::Flag => {}
            }
        }
        out
    }
}

/// Variables, injected services, and forwarded attributes visible to one
/// template render.
///
/// Contexts never chain: a component render starts from a fresh context,
/// so nothing from the caller leaks in unless passed as an attribute.
#[derive(Clone, Default)]
pub struct RenderContext {
    vars: IndexMap<String, Value>,
    services: HashMap<String, Injected>,
    attributes: AttributeBag,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a variable.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Get a variable by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Iterate over all variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.vars.iter()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Merge another set of variables over this one.
    pub fn extend<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (name, value) in vars {
            self.insert(name, value);
        }
    }

    /// Bind a dependency instance under a parameter name.
    pub fn insert_service(&mut self, parameter: impl Into<String>, instance: Injected) {
        self.services.insert(parameter.into(), instance);
    }

    /// Get a dependency instance and downcast it to its concrete type.
    pub fn service<T: Any + Send + Sync>(&self, parameter: &str) -> Option<Arc<T>> {
        self.services
            .get(parameter)
            .and_then(|instance| Arc::clone(instance).downcast::<T>().ok())
    }

    pub fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }

    pub fn set_attributes(&mut self, attributes: AttributeBag) {
        self.attributes = attributes;
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut services: Vec<&String> = self.services.keys().collect();
        services.sort();
        f.debug_struct("RenderContext")
            .field("vars", &self.vars)
            .field("services", &services)
            .field("attributes", &self.attributes)
            .finish()
    }
}
