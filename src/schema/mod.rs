//! Documentation schema generator
//!
//! Scrapes the Bot API documentation page and emits type declarations for
//! its data types and methods.
//!
//! # Features
//!
//! - **Type Rewriting**: Prose types (`Array of Integer or String`) become type expressions
//! - **Method Detection**: Method tables are told apart from data type tables by title casing
//! - **Response Inference**: Result types are read from "On success, ... is returned" phrases
//! - **Union Detection**: Link lists under single-word headings become union aliases
//! - **Unknown Fallbacks**: Undeclared names are emitted as `any` so the output always compiles

mod emitter;
mod extractor;
mod generator;
mod rewrite;
mod types;

pub use emitter::TypeScriptEmitter;
pub use extractor::{extract_schema, Extractor};
pub use generator::{
    GenerateReport, Generator, GeneratorConfig, GeneratorConfigBuilder, OutputFormat,
    DEFAULT_DOCS_URL,
};
pub use rewrite::{infer_response, rewrite_type};
pub use types::{ApiSchema, Field, Item, OneOfType, TypeExpr};
