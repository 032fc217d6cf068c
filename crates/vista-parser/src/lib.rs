//! Scanner and attribute parser for Vista markup.
//!
//! This crate turns template source into a token stream for the expander.
//! Built on `nom` for the small grammars inside tags; everything outside a
//! component tag or echo is passed through byte-for-byte.

mod attributes;
mod lexer;
mod scanner;

pub use attributes::parse_attributes;
pub use scanner::{scan, scan_template, Scanner};

use vista_core::{ParseError, Token};

/// Scan a whole template into a token vector.
///
/// # Example
///
/// ```ignore
/// use vista_parser::tokenize;
///
/// let tokens = tokenize(r#"<x-card title="Hi">body</x-card>"#)?;
/// assert_eq!(tokens.len(), 3);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    scan(source).collect()
}

/// Scan a whole component template into a token vector.
pub fn tokenize_template(source: &str) -> Result<Vec<Token>, ParseError> {
    scan_template(source).collect()
}
