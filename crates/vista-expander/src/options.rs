//! Options for component expansion.

/// Default limit for nested component expansion.
pub const DEFAULT_MAX_DEPTH: u32 = 100;

/// Which variables a component's body sees when it is expanded at
/// `<x-slot />`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SlotScope {
    /// The component's own context: its props and bound attributes.
    #[default]
    Component,
    /// The context of the markup that wrote the body.
    Caller,
}

/// Options for component expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExpandOptions {
    /// Deepest allowed chain of components expanding inside each other.
    /// Exceeding it fails with `CyclicExpansion`.
    pub max_depth: u32,
    /// When false, undefined variables and properties evaluate to null
    /// instead of failing the render.
    pub strict_variables: bool,
    pub slot_scope: SlotScope,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict_variables: true,
            slot_scope: SlotScope::Component,
        }
    }
}

impl ExpandOptions {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_strict_variables(mut self, strict: bool) -> Self {
        self.strict_variables = strict;
        self
    }

    pub fn with_slot_scope(mut self, slot_scope: SlotScope) -> Self {
        self.slot_scope = slot_scope;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExpandOptions::default();
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
        assert!(options.strict_variables);
        assert_eq!(options.slot_scope, SlotScope::Component);
    }

    #[test]
    fn test_setters() {
        let options = ExpandOptions::default()
            .with_max_depth(3)
            .with_strict_variables(false)
            .with_slot_scope(SlotScope::Caller);
        assert_eq!(options.max_depth, 3);
        assert!(!options.strict_variables);
        assert_eq!(options.slot_scope, SlotScope::Caller);
    }
}
