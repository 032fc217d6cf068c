//! Expression evaluation for dynamic attributes and echoes.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1, multispace0},
    combinator::{all_consuming, map, map_res, opt, recognize},
    multi::many0,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};
use vista_core::{EvalError, RenderContext, Value};

/// Evaluates expression source against a render context.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, source: &str, context: &RenderContext) -> Result<Value, EvalError>;
}

/// Evaluator for variable paths and literals.
///
/// Supported forms:
/// - `$name`, `$this->name` (both read `name` from the context)
/// - member access with `->name`, `.name`, `['name']`, `[0]`
/// - `'single'` and `"double"` quoted strings
/// - integers, floats, `true`, `false`, `null`
#[derive(Debug, Clone, Copy, Default)]
pub struct PathEvaluator;

impl Evaluator for PathEvaluator {
    fn evaluate(&self, source: &str, context: &RenderContext) -> Result<Value, EvalError> {
        let (_, expression) = all_consuming(delimited(multispace0, expression, multispace0))(source)
            .map_err(|_| EvalError::InvalidExpression {
                source_text: source.to_string(),
                reason: "expected a $variable path or a literal".to_string(),
            })?;

        match expression {
            Expression::Literal(value) => Ok(value),
            Expression::Path { root, segments } => lookup(root, &segments, context),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Expression<'s> {
    Literal(Value),
    Path { root: &'s str, segments: Vec<String> },
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

fn string_literal(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
    ))(input)
}

fn number(input: &str) -> IResult<&str, Value> {
    map_res(
        recognize(tuple((opt(char('-')), digit1, opt(pair(char('.'), digit1))))),
        |s: &str| {
            if s.contains('.') {
                s.parse::<f64>().map(Value::Float).map_err(|_| ())
            } else {
                s.parse::<i64>().map(Value::Int).map_err(|_| ())
            }
        },
    )(input)
}

fn literal(input: &str) -> IResult<&str, Value> {
    alt((
        map(string_literal, Value::from),
        number,
        map(tag("true"), |_| Value::Bool(true)),
        map(tag("false"), |_| Value::Bool(false)),
        map(tag("null"), |_| Value::Null),
    ))(input)
}

fn segment(input: &str) -> IResult<&str, String> {
    map(
        alt((
            preceded(tag("->"), identifier),
            preceded(char('.'), identifier),
            delimited(char('['), alt((string_literal, digit1)), char(']')),
        )),
        str::to_string,
    )(input)
}

fn path(input: &str) -> IResult<&str, Expression<'_>> {
    map(
        pair(preceded(char('$'), identifier), many0(segment)),
        |(root, segments)| Expression::Path { root, segments },
    )(input)
}

fn expression(input: &str) -> IResult<&str, Expression<'_>> {
    alt((path, map(literal, Expression::Literal)))(input)
}

/// Walk a variable path. `$this` names the context itself.
fn lookup(root: &str, segments: &[String], context: &RenderContext) -> Result<Value, EvalError> {
    let (mut current, rest, mut owner) = if root == "this" {
        let Some((first, rest)) = segments.split_first() else {
            let vars = context.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            return Ok(Value::Map(vars));
        };
        let value = context
            .get(first)
            .ok_or_else(|| EvalError::UndefinedVariable { name: first.clone() })?;
        (value, rest, first.as_str())
    } else {
        let value = context
            .get(root)
            .ok_or_else(|| EvalError::UndefinedVariable { name: root.to_string() })?;
        (value, segments, root)
    };

    for property in rest {
        if !matches!(current, Value::Map(_) | Value::List(_)) {
            return Err(EvalError::NotAnObject {
                property: property.clone(),
                type_name: current.type_name(),
            });
        }
        current = current.get(property).ok_or_else(|| EvalError::UndefinedProperty {
            variable: owner.to_string(),
            property: property.clone(),
        })?;
        owner = property.as_str();
    }

    Ok(current.clone())
}
