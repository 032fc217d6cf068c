//! Component expansion logic.
//!
//! Expands component tags by:
//! 1. Looking up the component definition
//! 2. Evaluating attributes in the caller's context
//! 3. Resolving injected dependencies
//! 4. Rendering the component's template in a fresh context
//! 5. Injecting the caller's body at `<x-slot />`

use tracing::{debug, trace, warn};
use vista_core::{
    escape_html, AttributeBag, AttributeValue, Attributes, BagAttribute, EvalError, ExpandError,
    ParseError, RenderContext, Span, Token, Value, SLOT_TAG,
};

use crate::component::ComponentScope;
use crate::registry::{defaults_context, ComponentDefinition, ComponentRegistry};
use crate::{Evaluator, ExpandOptions, Resolver, SlotScope};

/// Renders markup by expanding every component tag it contains.
///
/// Holds only shared references; each call to [`Expander::render`] keeps
/// its own expansion state, so one expander can serve concurrent renders.
pub struct Expander<'a> {
    registry: &'a ComponentRegistry,
    evaluator: &'a dyn Evaluator,
    resolver: &'a dyn Resolver,
    options: &'a ExpandOptions,
}

impl<'a> Expander<'a> {
    pub fn new(
        registry: &'a ComponentRegistry,
        evaluator: &'a dyn Evaluator,
        resolver: &'a dyn Resolver,
        options: &'a ExpandOptions,
    ) -> Self {
        Self {
            registry,
            evaluator,
            resolver,
            options,
        }
    }

    /// Expand `source` against the root `context`.
    pub fn render(&self, source: &str, context: &RenderContext) -> Result<String, ExpandError> {
        let tokens = vista_parser::tokenize(source)?;
        let mut pass = Expansion {
            expander: self,
            expansion_stack: Vec::new(),
        };
        let mut out = String::with_capacity(source.len());
        pass.expand_tokens(&tokens, context, None, &mut out)?;
        Ok(out)
    }
}

/// Body content passed to a component, remembered together with the scope
/// it was written in.
///
/// `outer` is the slot active where the body was written, so a
/// `<x-slot />` inside a body forwards that outer body.
#[derive(Clone, Copy)]
struct Slot<'t> {
    tokens: &'t [Token],
    context: &'t RenderContext,
    outer: Option<&'t Slot<'t>>,
}

/// State of one render call.
struct Expansion<'e, 'a> {
    expander: &'e Expander<'a>,
    /// Stack of component names being expanded (for cycle errors).
    expansion_stack: Vec<String>,
}

impl Expansion<'_, '_> {
    fn expand_tokens(
        &mut self,
        tokens: &[Token],
        context: &RenderContext,
        slot: Option<&Slot<'_>>,
        out: &mut String,
    ) -> Result<(), ExpandError> {
        let mut i = 0;
        while i < tokens.len() {
            match &tokens[i] {
                Token::Text(text) => out.push_str(text),
                Token::Echo { expression, raw, .. } => {
                    let value = self.evaluate(expression, context)?;
                    write_value(&value, *raw, out);
                }
                Token::AttributeBag => write_attribute_bag(context.attributes(), out),
                Token::TagOpen {
                    name,
                    raw_attributes,
                    self_closing,
                    span,
                } => {
                    let end = if *self_closing {
                        i
                    } else {
                        find_matching_close(tokens, i, name, *span)?
                    };
                    let inner = &tokens[(i + 1).min(end)..end];

                    if name == SLOT_TAG {
                        self.inject_slot(inner, context, slot, out)?;
                    } else {
                        let body = Slot {
                            tokens: inner,
                            context,
                            outer: slot,
                        };
                        self.expand_component(name, raw_attributes, *span, &body, out)?;
                    }
                    i = end;
                }
                Token::TagClose { name, span } => {
                    return Err(ParseError::UnexpectedClosingTag {
                        name: name.clone(),
                        span: *span,
                    }
                    .into());
                }
            }
            i += 1;
        }
        Ok(())
    }

    /// Expand the caller's body where `<x-slot />` appears, falling back to
    /// the slot tag's own content when no body was given.
    fn inject_slot(
        &mut self,
        fallback: &[Token],
        context: &RenderContext,
        slot: Option<&Slot<'_>>,
        out: &mut String,
    ) -> Result<(), ExpandError> {
        match slot {
            Some(body) if !body.tokens.is_empty() => {
                let scope = match self.expander.options.slot_scope {
                    SlotScope::Component => context,
                    SlotScope::Caller => body.context,
                };
                self.expand_tokens(body.tokens, scope, body.outer, out)
            }
            _ => self.expand_tokens(fallback, context, slot, out),
        }
    }

    fn expand_component(
        &mut self,
        name: &str,
        raw_attributes: &str,
        span: Span,
        body: &Slot<'_>,
        out: &mut String,
    ) -> Result<(), ExpandError> {
        let options = self.expander.options;

        // Check depth limit
        if self.expansion_stack.len() as u32 >= options.max_depth {
            let mut stack = self.expansion_stack.clone();
            stack.push(name.to_string());
            return Err(ExpandError::CyclicExpansion {
                depth: options.max_depth,
                stack,
            });
        }

        let definition = self.expander.registry.lookup(name, span)?;
        let attributes = vista_parser::parse_attributes(raw_attributes)?;

        debug!(
            component = name,
            depth = self.expansion_stack.len(),
            attributes = attributes.len(),
            body_tokens = body.tokens.len(),
            "expanding component"
        );

        let child = self.build_context(definition, &attributes, body.context)?;
        let scope = ComponentScope::new(name, &child, !body.tokens.is_empty());
        let template = definition.component.render(&scope)?;
        let tokens = vista_parser::tokenize_template(&template)?;

        self.expansion_stack.push(name.to_string());
        let result = self.expand_tokens(&tokens, &child, Some(body), out);
        self.expansion_stack.pop();

        result
    }

    /// Build the component's own context: prop defaults, then attributes
    /// evaluated in the caller's context, then injected dependencies.
    fn build_context(
        &self,
        definition: &ComponentDefinition,
        attributes: &Attributes,
        caller: &RenderContext,
    ) -> Result<RenderContext, ExpandError> {
        let mut context = defaults_context(definition);
        let mut bag = AttributeBag::new();

        for (attribute, value) in attributes {
            let (value, forwarded) = match value {
                AttributeValue::Literal(text) => {
                    (Value::String(text.clone()), BagAttribute::Literal(text.clone()))
                }
                AttributeValue::Expression(source) => {
                    let value = self.evaluate(source, caller)?;
                    (value.clone(), BagAttribute::Evaluated(value))
                }
                AttributeValue::Flag => (Value::Bool(true), BagAttribute::Flag),
            };

            let variable = variable_name(attribute);
            if !definition.declares(&variable) {
                bag.insert(attribute.clone(), forwarded);
            }
            context.insert(variable, value);
        }

        // Validate required props
        for prop in &definition.props {
            if prop.required && !context.contains(&prop.name) {
                return Err(ExpandError::MissingRequiredProp {
                    component: definition.tag_name.clone(),
                    prop: prop.name.clone(),
                });
            }
        }

        for dependency in &definition.dependencies {
            let instance = self.expander.resolver.resolve(dependency).ok_or_else(|| {
                ExpandError::DependencyResolution {
                    component: definition.tag_name.clone(),
                    parameter: dependency.parameter.clone(),
                    type_name: dependency.type_name,
                }
            })?;
            context.insert_service(dependency.parameter.clone(), instance);
        }

        context.set_attributes(bag);
        Ok(context)
    }

    fn evaluate(&self, source: &str, context: &RenderContext) -> Result<Value, ExpandError> {
        trace!(expression = source, "evaluating expression");
        match self.expander.evaluator.evaluate(source, context) {
            Ok(value) => Ok(value),
            Err(err @ (EvalError::UndefinedVariable { .. } | EvalError::UndefinedProperty { .. }))
                if !self.expander.options.strict_variables =>
            {
                warn!(expression = source, error = %err, "undefined value rendered as null");
                Ok(Value::Null)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Index of the close tag matching the open tag at `open`.
fn find_matching_close(tokens: &[Token], open: usize, name: &str, span: Span) -> Result<usize, ExpandError> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(open + 1) {
        match token {
            Token::TagOpen { name: n, self_closing: false, .. } if n == name => depth += 1,
            Token::TagClose { name: n, .. } if n == name => {
                if depth == 0 {
                    return Ok(index);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    Err(ParseError::UnclosedTag {
        name: name.to_string(),
        span,
    }
    .into())
}

fn write_value(value: &Value, raw: bool, out: &mut String) {
    match value {
        Value::Markup(markup) => out.push_str(markup),
        _ if raw => out.push_str(&value.to_string()),
        _ => out.push_str(&escape_html(&value.to_string())),
    }
}

/// An empty bag also swallows the single space written before it, so
/// `<div @attributes>` renders as `<div>`.
fn write_attribute_bag(bag: &AttributeBag, out: &mut String) {
    if bag.is_empty() {
        if out.ends_with(' ') {
            out.pop();
        }
    } else {
        out.push_str(&bag.render());
    }
}

/// Variable name an attribute binds to: kebab-case becomes camelCase.
fn variable_name(attribute: &str) -> String {
    let mut name = String::with_capacity(attribute.len());
    let mut upper = false;
    for c in attribute.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}
