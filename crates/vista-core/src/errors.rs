//! Error types for the Vista engine.

use crate::ast::Span;
use thiserror::Error;

/// Top-level error type for the Vista engine.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Expand(#[from] ExpandError),
}

/// Malformed markup found while scanning.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("Unclosed tag <{name}> opened at {span}")]
    UnclosedTag { name: String, span: Span },

    #[error("Closing tag </{found}> at {span} does not match open tag <{expected}>")]
    MismatchedClosingTag {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Closing tag </{name}> at {span} has no open tag")]
    UnexpectedClosingTag { name: String, span: Span },

    #[error("Unterminated tag <{name} at {span}")]
    UnterminatedTag { name: String, span: Span },

    #[error("Unterminated echo starting at {span}")]
    UnterminatedEcho { span: Span },

    #[error("Unterminated value for attribute '{name}'")]
    UnterminatedAttribute { name: String },

    #[error("Invalid attribute syntax near '{found}'")]
    InvalidAttribute { found: String },
}

impl ParseError {
    /// Where in the source the error was detected, when known.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::UnclosedTag { span, .. }
            | ParseError::MismatchedClosingTag { span, .. }
            | ParseError::UnexpectedClosingTag { span, .. }
            | ParseError::UnterminatedTag { span, .. }
            | ParseError::UnterminatedEcho { span } => Some(*span),
            ParseError::UnterminatedAttribute { .. } | ParseError::InvalidAttribute { .. } => None,
        }
    }
}

/// Errors evaluating a dynamic expression.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EvalError {
    #[error("Undefined variable: ${name}")]
    UndefinedVariable { name: String },

    #[error("Undefined property '{property}' on ${variable}")]
    UndefinedProperty { variable: String, property: String },

    #[error("Cannot read property '{property}' of a {type_name} value")]
    NotAnObject {
        property: String,
        type_name: &'static str,
    },

    #[error("Invalid expression '{source_text}': {reason}")]
    InvalidExpression { source_text: String, reason: String },
}

/// Errors during component expansion.
#[derive(Debug, Error)]
pub enum ExpandError {
    #[error("Unknown component <{name}> at {span}")]
    UnknownComponent { name: String, span: Span },

    #[error("Cannot resolve dependency '{parameter}' ({type_name}) for component <{component}>")]
    DependencyResolution {
        component: String,
        parameter: String,
        type_name: &'static str,
    },

    #[error("Maximum component nesting depth ({depth}) exceeded: {}", .stack.join(" -> "))]
    CyclicExpansion { depth: u32, stack: Vec<String> },

    #[error("Missing required prop '{prop}' for component <{component}>")]
    MissingRequiredProp { component: String, prop: String },

    #[error("Component <{component}> failed to render: {reason}")]
    Component { component: String, reason: String },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}
