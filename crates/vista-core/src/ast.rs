//! Token and attribute types for Vista markup.

use indexmap::IndexMap;
use std::fmt;

/// Prefix every component tag name starts with.
pub const COMPONENT_PREFIX: &str = "x-";

/// Reserved tag a component template uses to place its caller's body.
pub const SLOT_TAG: &str = "x-slot";

/// Attribute-name prefix marking a dynamic expression binding.
pub const BINDING_SIGIL: char = ':';

/// Source location of a token, for error reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A lexical unit of Vista markup.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// Markup passed through verbatim (plain text and standard HTML).
    Text(String),
    /// `<x-name attrs>` or `<x-name attrs />`.
    TagOpen {
        name: String,
        raw_attributes: String,
        self_closing: bool,
        span: Span,
    },
    /// `</x-name>`.
    TagClose { name: String, span: Span },
    /// `{{ expr }}` (escaped) or `{!! expr !!}` (raw).
    Echo {
        expression: String,
        raw: bool,
        span: Span,
    },
    /// The `@attributes` directive.
    AttributeBag,
}

/// The value side of a parsed attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeValue {
    /// Quoted text taken verbatim.
    Literal(String),
    /// Source of a `:name="..."` binding, evaluated by the caller's context.
    Expression(String),
    /// A bare attribute with no value (`disabled`).
    Flag,
}

/// Ordered attribute map, preserving source order.
pub type Attributes = IndexMap<String, AttributeValue>;
