//! Lexer primitives for Vista markup.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::{recognize, verify},
    error::{Error, ErrorKind},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};
use vista_core::COMPONENT_PREFIX;

/// Characters allowed after the `x-` prefix of a component tag.
pub fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || c == '.'
}

/// Characters allowed in an attribute name (sigil included).
pub fn is_attribute_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\'' | '<')
}

/// Parse a component tag name such as `x-my` or `x-with-injection`.
pub fn component_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        tag(COMPONENT_PREFIX),
        pair(
            take_while1(|c: char| c.is_alphanumeric()),
            take_while(is_name_char),
        ),
    ))(input)
}

/// Parse `</x-name>` allowing whitespace before the `>`.
pub fn closing_tag(input: &str) -> IResult<&str, &str> {
    delimited(tag("</"), component_name, pair(multispace0, char('>')))(input)
}

/// Parse `<x-name` and return the name.
pub fn opening_tag_start(input: &str) -> IResult<&str, &str> {
    preceded(char('<'), component_name)(input)
}

/// Take everything up to the first `>` that is not inside a quoted
/// attribute value, consuming the `>`.
///
/// A quote only opens a value directly after `=` (whitespace allowed), so
/// an apostrophe inside an unquoted value is ordinary text.
pub fn tag_contents(input: &str) -> IResult<&str, &str> {
    let mut quote: Option<char> = None;
    let mut after_equals = false;
    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') if after_equals => quote = Some(c),
            (None, '>') => return Ok((&input[i + 1..], &input[..i])),
            (None, '=') => after_equals = true,
            (None, c) if c.is_whitespace() => {}
            (None, _) => after_equals = false,
        }
        if quote.is_some() {
            after_equals = false;
        }
    }
    Err(nom::Err::Error(Error::new(input, ErrorKind::TakeUntil)))
}

/// Parse an attribute name, including a leading binding sigil.
pub fn attribute_name(input: &str) -> IResult<&str, &str> {
    take_while1(is_attribute_name_char)(input)
}

/// Parse a double- or single-quoted value, returning the inner text.
pub fn quoted_value(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
    ))(input)
}

/// Parse an unquoted attribute value (`name=value`). Quotes may appear
/// inside the value but not at its start.
pub fn unquoted_value(input: &str) -> IResult<&str, &str> {
    verify(take_while1(|c: char| !c.is_whitespace() && c != '>'), |value: &str| {
        !value.starts_with(|c: char| c == '"' || c == '\'')
    })(input)
}

/// Parse the `=` separating an attribute name from its value.
pub fn equals(input: &str) -> IResult<&str, char> {
    terminated(preceded(multispace0, char('=')), multispace0)(input)
}
