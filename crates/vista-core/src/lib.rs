//! Core types, tokens, and utilities for the Vista view component engine.
//!
//! This crate provides the foundational types used across all other vista crates:
//! - Token types produced by the markup scanner
//! - Attribute descriptors and runtime values
//! - The per-render variable context
//! - Error types

pub mod ast;
pub mod context;
pub mod errors;
pub mod value;

pub use ast::*;
pub use context::*;
pub use errors::*;
pub use value::*;
