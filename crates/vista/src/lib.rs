//! Vista: a view component engine.
//!
//! Markup may use component tags such as `<x-card title="Hi">body</x-card>`.
//! Each tag is looked up in a registry, rendered from its own template in a
//! fresh context, and replaced by the result:
//!
//! ```
//! use vista::{ComponentBuilder, ViewEngine};
//!
//! let engine = ViewEngine::builder()
//!     .component(ComponentBuilder::new("x-my").template("<div @attributes><x-slot /></div>").build())
//!     .build();
//!
//! let html = engine
//!     .view(r#"<x-my :foo="$this->input" bar="barValue"></x-my>"#)
//!     .data("input", "hello")
//!     .render()
//!     .unwrap();
//! assert_eq!(html, r#"<div foo="hello" bar="barValue"></div>"#);
//! ```

pub mod components;
pub mod container;
pub mod session;
pub mod validation;
mod view;

pub use container::Container;
pub use session::{Flash, Session};
pub use validation::{AlphaNumeric, Between, Rule};
pub use view::{view, ViewEngine, ViewEngineBuilder, ViewHandle};

pub use vista_core::{
    AttributeBag, AttributeValue, EvalError, ExpandError, Injected, ParseError, RenderContext,
    Span, Token, Value, ViewError,
};
pub use vista_expander::{
    ComponentBuilder, ComponentDefinition, ComponentRegistry, ComponentScope, Dependency,
    Evaluator, ExpandOptions, MarkupComponent, PathEvaluator, Resolver, SlotScope, ViewComponent,
};
pub use vista_parser::{parse_attributes, scan, scan_template, tokenize, tokenize_template};
