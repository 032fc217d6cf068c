//! Lazy tokenizer for Vista markup.
//!
//! Recognizes component tags (`<x-name ...>`, `<x-name ... />`,
//! `</x-name>`) and echoes of a variable (`{{ $expr }}`, `{!! $expr !!}`).
//! In component templates it also recognizes the `@attributes` directive
//! inside a start tag. Everything else is text and is returned exactly as
//! written, so `{{ name }}` or a stray `@attributes` pass through.

use smallvec::SmallVec;
use vista_core::{ParseError, Span, Token};

use crate::lexer::*;

const ATTRIBUTES_DIRECTIVE: &str = "@attributes";

/// Create a scanner over view markup.
pub fn scan(source: &str) -> Scanner<'_> {
    Scanner::new(source)
}

/// Create a scanner over a component template, where `@attributes` is a
/// directive.
pub fn scan_template(source: &str) -> Scanner<'_> {
    Scanner::template(source)
}

/// What starts at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Special {
    Open,
    Close,
    Echo,
    RawEcho,
    AttributeBag,
}

/// Iterator of tokens. Stops after the first error.
///
/// Tracks open component tags so that an unclosed or mismatched tag is
/// reported as soon as it is detected, never after partial output.
#[derive(Debug)]
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
    line: u32,
    column: u32,
    open: SmallVec<[(String, Span); 8]>,
    attribute_bag: bool,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
            open: SmallVec::new(),
            attribute_bag: false,
            done: false,
        }
    }

    pub fn template(source: &'a str) -> Self {
        Self {
            attribute_bag: true,
            ..Self::new(source)
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn here(&self) -> Span {
        Span {
            start: self.pos,
            end: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    /// Consume `n` bytes, keeping line and column in sync.
    fn advance(&mut self, n: usize) {
        for c in self.source[self.pos..self.pos + n].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += n;
    }

    /// What starts at byte offset `at`, if anything.
    fn special_at(&self, at: usize) -> Option<Special> {
        let input = &self.source[at..];
        if let Some(after) = input.strip_prefix("</") {
            return component_name(after).ok().map(|_| Special::Close);
        }
        if input.starts_with('<') {
            return opening_tag_start(input).ok().map(|_| Special::Open);
        }
        if let Some(after) = input.strip_prefix("{!!") {
            return echoes_variable(after).then_some(Special::RawEcho);
        }
        if let Some(after) = input.strip_prefix("{{") {
            return echoes_variable(after).then_some(Special::Echo);
        }
        if let Some(after) = input.strip_prefix(ATTRIBUTES_DIRECTIVE) {
            let continues_word = after.chars().next().is_some_and(is_name_char);
            if self.attribute_bag && !continues_word && self.in_start_tag(at) {
                return Some(Special::AttributeBag);
            }
        }
        None
    }

    /// Whether `at` lies between the name of an HTML start tag and its `>`.
    fn in_start_tag(&self, at: usize) -> bool {
        let before = &self.source[..at];
        let Some(lt) = before.rfind('<') else {
            return false;
        };
        let inside = &before[lt + 1..];
        inside.starts_with(|c: char| c.is_ascii_alphabetic()) && tag_contents(inside).is_err()
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        match self.special_at(self.pos) {
            Some(Special::Open) => self.scan_opening_tag(),
            Some(Special::Close) => self.scan_closing_tag(),
            Some(Special::RawEcho) => self.scan_echo("{!!", "!!}", true),
            Some(Special::Echo) => self.scan_echo("{{", "}}", false),
            Some(Special::AttributeBag) => {
                self.advance(ATTRIBUTES_DIRECTIVE.len());
                Ok(Token::AttributeBag)
            }
            None => Ok(self.scan_text()),
        }
    }

    /// Take text up to the next special construct (at least one char).
    fn scan_text(&mut self) -> Token {
        let rest = self.rest();
        let end = rest
            .char_indices()
            .skip(1)
            .find(|&(i, c)| matches!(c, '<' | '{' | '@') && self.special_at(self.pos + i).is_some())
            .map_or(rest.len(), |(i, _)| i);

        self.advance(end);
        Token::Text(rest[..end].to_string())
    }

    fn scan_opening_tag(&mut self) -> Result<Token, ParseError> {
        let mut span = self.here();
        let rest = self.rest();

        let (after_name, name) = opening_tag_start(rest).map_err(|_| ParseError::InvalidAttribute {
            found: rest.chars().take(16).collect(),
        })?;
        let (after, contents) = tag_contents(after_name).map_err(|_| ParseError::UnterminatedTag {
            name: name.to_string(),
            span,
        })?;

        let contents = contents.trim_end();
        let (raw_attributes, self_closing) = match contents.strip_suffix('/') {
            Some(attrs) => (attrs.trim(), true),
            None => (contents.trim(), false),
        };

        let name = name.to_string();
        let raw_attributes = raw_attributes.to_string();
        self.advance(rest.len() - after.len());
        span.end = self.pos;

        if !self_closing {
            self.open.push((name.clone(), span));
        }

        Ok(Token::TagOpen {
            name,
            raw_attributes,
            self_closing,
            span,
        })
    }

    fn scan_closing_tag(&mut self) -> Result<Token, ParseError> {
        let mut span = self.here();
        let rest = self.rest();

        let (after, name) = closing_tag(rest).map_err(|_| ParseError::UnterminatedTag {
            name: component_name(&rest[2..]).map_or_else(|_| String::new(), |(_, n)| n.to_string()),
            span,
        })?;

        let name = name.to_string();
        self.advance(rest.len() - after.len());
        span.end = self.pos;

        match self.open.last() {
            Some((expected, _)) if *expected == name => {
                self.open.pop();
                Ok(Token::TagClose { name, span })
            }
            Some((expected, _)) => Err(ParseError::MismatchedClosingTag {
                expected: expected.clone(),
                found: name,
                span,
            }),
            None => Err(ParseError::UnexpectedClosingTag { name, span }),
        }
    }

    fn scan_echo(&mut self, open: &str, close: &str, raw: bool) -> Result<Token, ParseError> {
        let mut span = self.here();
        let inner = &self.rest()[open.len()..];

        let end = inner.find(close).ok_or(ParseError::UnterminatedEcho { span })?;
        let expression = inner[..end].trim().to_string();

        self.advance(open.len() + end + close.len());
        span.end = self.pos;

        Ok(Token::Echo { expression, raw, span })
    }
}

/// An echo needs a `$variable` after its opener; anything else, such as
/// another framework's `{{ name }}`, is text.
fn echoes_variable(after_open: &str) -> bool {
    after_open.trim_start().starts_with('$')
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.pos >= self.source.len() {
            self.done = true;
            return self
                .open
                .pop()
                .map(|(name, span)| Err(ParseError::UnclosedTag { name, span }));
        }

        let token = self.next_token();
        if token.is_err() {
            self.done = true;
        }
        Some(token)
    }
}
