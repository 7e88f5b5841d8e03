//! Structured prompt templates: metadata, typed variables, reusable parts,
//! and a template body with `{{variable}}` tokens and conditional part
//! selection, stored as XML.
//!
//! # Operations
//!
//! - [`parse_document`]: XML text into a structured [`Document`]
//! - [`validate_document`]: cross-referential consistency checks
//! - [`render_document`] / [`render_str`]: final text from a document (or
//!   raw XML) plus concrete variable values
//! - [`document_to_xml`]: a validated document back to canonical XML
//!
//! All operations are synchronous and pure: a [`Document`] is never mutated
//! by validation or rendering, so one instance is safe for unlimited
//! concurrent read-only use.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use promptml::render_str;
//!
//! let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <prompt>
//!   <metadata><title>Greeting</title></metadata>
//!   <variables>
//!     <var name="name" required="true"/>
//!     <var name="greeting" required="false">Hello</var>
//!   </variables>
//!   <template>{{greeting}} {{name}}!</template>
//! </prompt>"#;
//!
//! let mut input = HashMap::new();
//! input.insert("name".to_string(), "Alice".to_string());
//! assert_eq!(render_str(xml, &input).unwrap(), "Hello Alice!");
//! ```

pub mod cli;
pub mod commands;
pub mod document;
pub mod error;
pub mod exit_codes;
pub mod render;
pub mod template;
pub mod validate;
pub mod xml;

pub use document::{Document, Metadata, Part, Variable};
pub use error::{PromptError, Result};
pub use render::{render_document, render_str};
pub use validate::validate_document;
pub use xml::{document_to_xml, parse_document};
