//! Built-in form components.

use std::fmt::{self, Write as _};

use vista_core::{escape_html, ExpandError};
use vista_expander::{ComponentBuilder, ComponentDefinition, ComponentRegistry, ComponentScope};

use crate::session::Session;

pub const INPUT: &str = "x-input";
pub const FORM: &str = "x-form";

/// Register `x-input` and `x-form`.
pub fn register(registry: &mut ComponentRegistry) {
    registry.register(input());
    registry.register(form());
}

/// `<x-input name=".." label=".." type="..">`: a labelled input prefilled
/// from the session, followed by one error line per failed rule.
pub fn input() -> ComponentDefinition {
    ComponentBuilder::new(INPUT)
        .prop("name")
        .prop("label")
        .optional_prop("type", "text")
        .inject::<Session>("session")
        .render_with(render_input)
        .build()
}

/// `<x-form action="..">` wrapping its body.
pub fn form() -> ComponentDefinition {
    ComponentBuilder::new(FORM)
        .prop("action")
        .optional_prop("method", "post")
        .template(r#"<form action="{{ $action }}" method="{{ $method }}" @attributes><x-slot /></form>"#)
        .build()
}

fn render_input(scope: &ComponentScope<'_>) -> Result<String, ExpandError> {
    let session = scope.service::<Session>("session")?;
    input_markup(scope, &session).map_err(|err| ExpandError::Component {
        component: scope.tag_name().to_string(),
        reason: err.to_string(),
    })
}

fn input_markup(scope: &ComponentScope<'_>, session: &Session) -> Result<String, fmt::Error> {
    let field = scope.text("name");
    let name = inert(&field);
    let value = session.original_value(&field).unwrap_or_default();

    let mut out = String::from("<div>\n");
    writeln!(out, "    <label for=\"{name}\">{}</label>", inert(&scope.text("label")))?;
    writeln!(
        out,
        "    <input type=\"{}\" name=\"{name}\" id=\"{name}\" value=\"{}\" @attributes />",
        inert(&scope.text("type")),
        inert(&value),
    )?;
    for rule in session.errors_for(&field) {
        writeln!(out, "    <div class=\"error\">{}</div>", inert(&rule.message()))?;
    }
    out.push_str("</div>");
    Ok(out)
}

/// Escape text spliced into generated template source so that it is
/// neither markup nor a template directive.
fn inert(text: &str) -> String {
    escape_html(text).replace('{', "&#123;").replace('@', "&#64;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Flash;
    use crate::validation::{Between, Rule};
    use std::sync::Arc;
    use vista_core::RenderContext;

    #[test]
    fn test_register_builtins() {
        let mut registry = ComponentRegistry::new();
        register(&mut registry);
        assert!(registry.contains(INPUT));
        assert!(registry.contains(FORM));
    }

    #[test]
    fn test_input_declares_session() {
        let input = input();
        assert_eq!(input.dependencies.len(), 1);
        assert_eq!(input.dependencies[0].parameter, "session");
        assert!(input.declares("type"));
    }

    #[test]
    fn test_input_markup() {
        let session = Session::new();
        session.flash(
            Session::ORIGINAL_VALUES,
            Flash::Values([("age".to_string(), "x".to_string())].into_iter().collect()),
        );
        session.flash(
            Session::VALIDATION_ERRORS,
            Flash::Errors([("age".to_string(), vec![Arc::new(Between::new(1, 10)) as Arc<dyn Rule>])].into_iter().collect()),
        );

        let mut context = RenderContext::new();
        context.insert("name", "age");
        context.insert("label", "Age");
        context.insert("type", "number");
        let scope = ComponentScope::new(INPUT, &context, false);

        assert_eq!(
            input_markup(&scope, &session).unwrap(),
            "<div>\n    <label for=\"age\">Age</label>\n    \
             <input type=\"number\" name=\"age\" id=\"age\" value=\"x\" @attributes />\n    \
             <div class=\"error\">Value should be between 1 and 10</div>\n</div>"
        );
    }

    #[test]
    fn test_inert_text() {
        assert_eq!(inert("{{ $x }}"), "&#123;&#123; $x }}");
        assert_eq!(inert("a@attributes<b>"), "a&#64;attributes&lt;b&gt;");
    }
}
