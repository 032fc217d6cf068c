//! Per-request flash store read by form components.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use crate::validation::Rule;

/// Data flashed to the next request.
#[derive(Debug, Clone)]
pub enum Flash {
    /// Field name → submitted value.
    Values(IndexMap<String, String>),
    /// Field name → rules the submitted value failed.
    Errors(IndexMap<String, Vec<Arc<dyn Rule>>>),
}

/// Flash storage scoped to one request.
///
/// Written before rendering, only read while rendering.
#[derive(Debug, Default)]
pub struct Session {
    flashed: RwLock<HashMap<String, Flash>>,
}

impl Session {
    pub const ORIGINAL_VALUES: &'static str = "_original_values";
    pub const VALIDATION_ERRORS: &'static str = "_validation_errors";

    pub fn new() -> Self {
        Self::default()
    }

    /// Store `flash` under `key`, replacing what was there.
    pub fn flash(&self, key: &str, flash: Flash) {
        self.write().insert(key.to_string(), flash);
    }

    pub fn get(&self, key: &str) -> Option<Flash> {
        self.read().get(key).cloned()
    }

    /// Remove everything flashed.
    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn original_values(&self) -> IndexMap<String, String> {
        match self.read().get(Self::ORIGINAL_VALUES) {
            Some(Flash::Values(values)) => values.clone(),
            _ => IndexMap::new(),
        }
    }

    pub fn validation_errors(&self) -> IndexMap<String, Vec<Arc<dyn Rule>>> {
        match self.read().get(Self::VALIDATION_ERRORS) {
            Some(Flash::Errors(errors)) => errors.clone(),
            _ => IndexMap::new(),
        }
    }

    /// The value submitted for `field`, if one was flashed.
    pub fn original_value(&self, field: &str) -> Option<String> {
        match self.read().get(Self::ORIGINAL_VALUES) {
            Some(Flash::Values(values)) => values.get(field).cloned(),
            _ => None,
        }
    }

    /// Rules that `field` failed, in the order they were flashed.
    pub fn errors_for(&self, field: &str) -> Vec<Arc<dyn Rule>> {
        match self.read().get(Self::VALIDATION_ERRORS) {
            Some(Flash::Errors(errors)) => errors.get(field).cloned().unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    // A writer that panicked leaves a complete map behind, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Flash>> {
        self.flashed.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Flash>> {
        self.flashed.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
