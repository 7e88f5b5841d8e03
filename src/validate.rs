//! Document validation: the single source of truth for well-formedness.
//!
//! Five checks run in a fixed order and stop at the first failure:
//!
//! 1. the metadata title is present and non-empty
//! 2. every variable the template references is declared
//! 3. every non-required variable carries a default
//! 4. every conditional directive names a declared variable
//! 5. every conditional directive's show/else part exists
//!
//! A variable that is declared but never referenced is not an error.
//! Validation runs automatically before rendering and before serialization,
//! and can be invoked on its own.

use crate::document::Document;
use crate::error::PromptError;
use crate::template::{extract_variables, find_directives};
use anyhow::bail;
use std::collections::HashSet;

/// Validate a document's internal consistency.
///
/// # Errors
///
/// Fails with [`PromptError::Validation`] on the first violated check; the
/// message names the offending variable or part.
pub fn validate_document(doc: &Document) -> crate::error::Result<()> {
    check_document(doc).map_err(|e| PromptError::Validation(e.to_string()))
}

/// The unwrapped check sequence, shared with operations that validate as a
/// pipeline step and apply their own error prefix.
pub(crate) fn check_document(doc: &Document) -> anyhow::Result<()> {
    match doc.metadata.title() {
        Some(title) if !title.is_empty() => {}
        _ => bail!("document metadata is missing a non-empty 'title'"),
    }

    let declared: HashSet<&str> = doc.variables.iter().map(|v| v.name.as_str()).collect();

    for name in extract_variables(&doc.template) {
        if !declared.contains(name.as_str()) {
            bail!("template references undeclared variable '{}'", name);
        }
    }

    for variable in &doc.variables {
        if !variable.required && variable.default.is_none() {
            bail!("optional variable '{}' has no default value", variable.name);
        }
    }

    let directives = find_directives(&doc.template);

    for directive in &directives {
        if !declared.contains(directive.var.as_str()) {
            bail!("conditional references undeclared variable '{}'", directive.var);
        }
    }

    for directive in &directives {
        if doc.part(&directive.show).is_none() {
            bail!("conditional references unknown part '{}'", directive.show);
        }
        if let Some(else_part) = &directive.else_part
            && doc.part(else_part).is_none()
        {
            bail!("conditional references unknown part '{}'", else_part);
        }
    }

    Ok(())
}
