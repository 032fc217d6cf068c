//! Attribute parsing for component tags.

use vista_core::{AttributeValue, Attributes, ParseError, BINDING_SIGIL};

use crate::lexer::{attribute_name, equals, quoted_value, unquoted_value};

/// Parse the raw attribute text of a component tag.
///
/// Accepts `name="value"`, `name='value'`, `name=value` and bare `name`.
/// A name starting with `:` is a binding: the sigil is stripped and the
/// value kept as expression source. Values are never unescaped or
/// re-escaped here.
pub fn parse_attributes(raw: &str) -> Result<Attributes, ParseError> {
    let mut attributes = Attributes::new();
    let mut input = raw.trim_start();

    while !input.is_empty() {
        let (rest, name) = attribute_name(input).map_err(|_| ParseError::InvalidAttribute {
            found: snippet(input),
        })?;

        let (rest, value) = match equals(rest) {
            Ok((after_eq, _)) => {
                let (rest, text) = quoted_value(after_eq)
                    .or_else(|_| unquoted_value(after_eq))
                    .map_err(|_| ParseError::UnterminatedAttribute {
                        name: name.to_string(),
                    })?;
                (rest, Some(text))
            }
            Err(_) => (rest, None),
        };

        let (name, value) = match name.strip_prefix(BINDING_SIGIL) {
            Some(bound) => {
                let source = value.ok_or_else(|| ParseError::InvalidAttribute {
                    found: name.to_string(),
                })?;
                if bound.is_empty() {
                    return Err(ParseError::InvalidAttribute {
                        found: name.to_string(),
                    });
                }
                (bound, AttributeValue::Expression(source.to_string()))
            }
            None => (
                name,
                value.map_or(AttributeValue::Flag, |text| AttributeValue::Literal(text.to_string())),
            ),
        };

        attributes.insert(name.to_string(), value);
        input = rest.trim_start();
    }

    Ok(attributes)
}

fn snippet(input: &str) -> String {
    input.chars().take(16).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(s: &str) -> AttributeValue {
        AttributeValue::Literal(s.to_string())
    }

    #[test]
    fn test_empty() {
        assert!(parse_attributes("").unwrap().is_empty());
        assert!(parse_attributes("   \n ").unwrap().is_empty());
    }

    #[test]
    fn test_literals_keep_order() {
        let attrs = parse_attributes(r#"foo="fooValue" bar='barValue'"#).unwrap();
        let names: Vec<&str> = attrs.keys().map(String::as_str).collect();
        assert_eq!(names, ["foo", "bar"]);
        assert_eq!(attrs["foo"], literal("fooValue"));
        assert_eq!(attrs["bar"], literal("barValue"));
    }

    #[test]
    fn test_binding_sigil() {
        let attrs = parse_attributes(r#":foo="$this->input" bar="barValue""#).unwrap();
        assert_eq!(attrs["foo"], AttributeValue::Expression("$this->input".into()));
        assert_eq!(attrs["bar"], literal("barValue"));
        assert!(!attrs.contains_key(":foo"));
    }

    #[test]
    fn test_values_are_verbatim() {
        let attrs = parse_attributes(r#"title="a &amp; b" data='{"k": 1}'"#).unwrap();
        assert_eq!(attrs["title"], literal("a &amp; b"));
        assert_eq!(attrs["data"], literal(r#"{"k": 1}"#));
    }

    #[test]
    fn test_flags_and_unquoted() {
        let attrs = parse_attributes("disabled type=number\n  required").unwrap();
        assert_eq!(attrs["disabled"], AttributeValue::Flag);
        assert_eq!(attrs["type"], literal("number"));
        assert_eq!(attrs["required"], AttributeValue::Flag);
    }

    #[test]
    fn test_apostrophe_in_unquoted_value() {
        let attrs = parse_attributes("title=don't size=2").unwrap();
        assert_eq!(attrs["title"], literal("don't"));
        assert_eq!(attrs["size"], literal("2"));
    }

    #[test]
    fn test_spaces_around_equals() {
        let attrs = parse_attributes(r#"name = "a""#).unwrap();
        assert_eq!(attrs["name"], literal("a"));
    }

    #[test]
    fn test_duplicate_keeps_first_position_last_value() {
        let attrs = parse_attributes(r#"a="1" b="2" a="3""#).unwrap();
        let names: Vec<&str> = attrs.keys().map(String::as_str).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(attrs["a"], literal("3"));
    }

    #[test]
    fn test_unterminated_value() {
        let err = parse_attributes(r#"name="open"#).unwrap_err();
        assert_eq!(err, ParseError::UnterminatedAttribute { name: "name".into() });
    }

    #[test]
    fn test_binding_without_value() {
        assert!(matches!(
            parse_attributes(":foo").unwrap_err(),
            ParseError::InvalidAttribute { .. }
        ));
        assert!(matches!(
            parse_attributes(r#":="x""#).unwrap_err(),
            ParseError::InvalidAttribute { .. }
        ));
    }
}
