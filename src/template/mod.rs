//! Template processing subsystem.
//!
//! This module provides the pure text transforms behind rendering:
//!
//! - **Scanner**: extracts `{{variable}}` tokens from a template body
//! - **Resolver**: reconciles declared variables with supplied values
//! - **Conditional**: replaces `<if .../>` directives with part content
//! - **Substitute**: replaces tokens with resolved values
//!
//! # Token syntax
//!
//! A token is `{{name}}`; the inner name is trimmed and may not contain `}`.
//! Tokens do not nest.
//!
//! Every function here operates only on its arguments and returns a fresh
//! result. Sequencing and error wrapping live in the `render` facade.

mod conditional;
mod resolver;
mod scanner;
mod substitute;

pub use conditional::{Directive, find_directives, process_conditionals};
pub use resolver::resolve;
pub use scanner::extract_variables;
pub use substitute::substitute;
