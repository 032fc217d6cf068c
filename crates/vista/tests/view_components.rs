use std::sync::Arc;

use indexmap::IndexMap;
use proptest::prelude::*;
use vista::{
    AlphaNumeric, Between, ComponentBuilder, Container, ExpandError, ExpandOptions, Flash,
    ParseError, Rule, Session, ViewEngine, ViewError,
};

struct Greeter {
    greeting: &'static str,
}

fn engine() -> ViewEngine {
    let mut container = Container::new();
    container.register(Greeter { greeting: "hi" });

    ViewEngine::builder()
        .with_builtin_components()
        .component(ComponentBuilder::new("x-my").template("<div @attributes><x-slot /></div>").build())
        .component(
            ComponentBuilder::new("x-with-injection")
                .inject::<Greeter>("greeter")
                .render_with(|scope| Ok(scope.service::<Greeter>("greeter")?.greeting.to_string()))
                .build(),
        )
        .container(container)
        .build()
}

#[test]
fn test_view_components() {
    let cases = [
        ("<x-my></x-my>", "<div></div>"),
        ("<x-my>body</x-my>", "<div>body</div>"),
        ("<x-my><p>a</p><p>b</p></x-my>", "<div><p>a</p><p>b</p></div>"),
        ("<x-my>body</x-my><x-my>body</x-my>", "<div>body</div><div>body</div>"),
        (
            r#"<x-my foo="fooValue" bar="barValue">body</x-my>"#,
            r#"<div foo="fooValue" bar="barValue">body</div>"#,
        ),
        ("<x-my>\nbody\n\nmultiline\n</x-my>", "<div>\nbody\n\nmultiline\n</div>"),
    ];

    let engine = engine();
    for (component, rendered) in cases {
        assert_eq!(engine.view(component).render().unwrap(), rendered, "rendering {component:?}");
    }
}

#[test]
fn test_view_component_with_expression() {
    let html = engine()
        .view(r#"<x-my :foo="$this->input" bar="barValue"></x-my>"#)
        .data("input", "hello")
        .render()
        .unwrap();

    assert_eq!(html, r#"<div foo="hello" bar="barValue"></div>"#);
}

#[test]
fn test_nested_components() {
    let source = r##"<x-form action="#">
    <div>
        <x-input name="a" label="a" type="number"></x-input>
    </div>
    <x-input name="b" label="b" type="text" />
</x-form>"##;

    let engine = engine();
    let html = engine.view(source).service(Arc::new(Session::new())).render().unwrap();

    let expected = r##"<form action="#" method="post">
    <div>
        <div>
    <label for="a">a</label>
    <input type="number" name="a" id="a" value="" />
</div>
    </div>
    <div>
    <label for="b">b</label>
    <input type="text" name="b" id="b" value="" />
</div>
</form>"##;
    assert_eq!(html, expected);
}

#[test]
fn test_other_template_syntax_passes_through() {
    let engine = engine();
    assert_eq!(
        engine.view("<p>Use {{ name }} in Vue</p>").render().unwrap(),
        "<p>Use {{ name }} in Vue</p>"
    );
    assert_eq!(
        engine.view("<p>ping me @attributes</p>").render().unwrap(),
        "<p>ping me @attributes</p>"
    );
}

#[test]
fn test_single_quoted_json_attribute_is_forwarded_safely() {
    let html = engine().view(r#"<x-my data-json='{"k":1}'></x-my>"#).render().unwrap();
    assert_eq!(html, r#"<div data-json="{&quot;k&quot;:1}"></div>"#);
}

#[test]
fn test_apostrophe_in_unquoted_attribute() {
    let html = engine().view("<x-my title=don't>x</x-my>").render().unwrap();
    assert_eq!(html, r#"<div title="don't">x</div>"#);
}

#[test]
fn test_view_component_with_session() {
    let between: Arc<dyn Rule> = Arc::new(Between::new(1, 10));
    let alpha_numeric: Arc<dyn Rule> = Arc::new(AlphaNumeric);

    let session = Session::new();
    let mut errors = IndexMap::new();
    errors.insert("name".to_string(), vec![Arc::clone(&between), Arc::clone(&alpha_numeric)]);
    session.flash(Session::VALIDATION_ERRORS, Flash::Errors(errors));

    let mut values = IndexMap::new();
    values.insert("name".to_string(), "original name".to_string());
    session.flash(Session::ORIGINAL_VALUES, Flash::Values(values));

    let html = engine()
        .view(r#"<x-input name="name" label="a" type="number" />"#)
        .service(Arc::new(session))
        .render()
        .unwrap();

    assert!(html.contains(r#"value="original name""#), "{html}");
    assert!(html.contains(&between.message()));
    assert!(html.contains(&alpha_numeric.message()));
}

#[test]
fn test_session_values_are_escaped() {
    let session = Session::new();
    let mut values = IndexMap::new();
    values.insert("q".to_string(), r#""><script>{{ $x }}"#.to_string());
    session.flash(Session::ORIGINAL_VALUES, Flash::Values(values));

    let html = engine()
        .view(r#"<x-input name="q" label="Search" />"#)
        .service(Arc::new(session))
        .render()
        .unwrap();

    assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;&#123;&#123; $x }}""#), "{html}");
}

#[test]
fn test_input_without_session_fails() {
    let err = engine().view(r#"<x-input name="a" label="a" />"#).render().unwrap_err();
    assert!(matches!(
        err,
        ViewError::Expand(ExpandError::DependencyResolution { ref parameter, .. }) if parameter == "session"
    ));
}

#[test]
fn test_component_with_injected_dependency() {
    assert_eq!(engine().view("<x-with-injection />").render().unwrap(), "hi");
}

#[test]
fn test_render_is_idempotent() {
    let handle = engine().view(r#"<x-my :id="$this->id">{{ $id }}</x-my>"#).data("id", 7);
    let first = handle.render().unwrap();
    assert_eq!(first, r#"<div id="7">7</div>"#);
    assert_eq!(handle.render().unwrap(), first);
}

#[test]
fn test_malformed_markup() {
    let err = engine().view("<x-my>body").render().unwrap_err();
    assert!(matches!(
        err,
        ViewError::Expand(ExpandError::Parse(ParseError::UnclosedTag { ref name, .. })) if name == "x-my"
    ));

    let err = engine().view("<x-my>body</x-form>").render().unwrap_err();
    assert!(matches!(err, ViewError::Expand(ExpandError::Parse(ParseError::MismatchedClosingTag { .. }))));
}

#[test]
fn test_unknown_component() {
    let err = engine().view("<p>\n  <x-missing /></p>").render().unwrap_err();
    match err {
        ViewError::Expand(ExpandError::UnknownComponent { name, span }) => {
            assert_eq!(name, "x-missing");
            assert_eq!((span.line, span.column), (2, 3));
        }
        other => panic!("Expected UnknownComponent, got {other:?}"),
    }
}

#[test]
fn test_cycle_guard() {
    let engine = ViewEngine::builder()
        .component(ComponentBuilder::new("x-loop").template("<p><x-loop /></p>").build())
        .options(ExpandOptions::default().with_max_depth(16))
        .build();

    let err = engine.view("<x-loop />").render().unwrap_err();
    assert!(matches!(err, ViewError::Expand(ExpandError::CyclicExpansion { depth: 16, .. })));
    assert!(err.to_string().contains("x-loop -> x-loop"));
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = engine();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.view(r#"<x-my :n="$i">{{ $n }}</x-my>"#).data("i", i).render())
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap().unwrap(), format!(r#"<div n="{i}">{i}</div>"#));
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_options_from_json() {
    let options: ExpandOptions = serde_json::from_str(r#"{ "max_depth": 12 }"#).unwrap();
    assert_eq!(options, ExpandOptions::default().with_max_depth(12));
}

proptest! {
    #[test]
    fn plain_markup_round_trips(source in "[a-zA-Z0-9 <>/=\"'\n.,!?{}@]{0,64}") {
        let rendered = engine().view(source.clone()).render().unwrap();
        prop_assert_eq!(rendered, source);
    }
}
