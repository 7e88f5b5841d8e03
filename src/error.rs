//! Error types for promptml.
//!
//! One error taxonomy is exposed to callers: a [`PromptError`] variant per
//! top-level operation. The message is prefixed with the failing operation
//! and carries the root-cause message as its suffix, so the concrete kind of
//! an internal failure is erased without losing the diagnostic text.
//! Internal failures are raised once at the point of detection and wrapped
//! exactly once at the operation boundary.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for promptml operations.
///
/// Each variant maps to a specific exit code for the CLI.
#[derive(Error, Debug)]
pub enum PromptError {
    /// Document validation failed.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// XML could not be parsed into a document.
    #[error("Parse failed: {0}")]
    Parse(String),

    /// A document could not be serialized back to XML.
    #[error("Conversion to XML failed: {0}")]
    Convert(String),

    /// Rendering a document to final text failed.
    #[error("Render failed: {0}")]
    Render(String),
}

impl PromptError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PromptError::Validation(_) => exit_codes::VALIDATION_FAILURE,
            PromptError::Parse(_) => exit_codes::PARSE_FAILURE,
            PromptError::Convert(_) => exit_codes::CONVERSION_FAILURE,
            PromptError::Render(_) => exit_codes::RENDER_FAILURE,
        }
    }
}

/// Result type alias for promptml operations.
pub type Result<T> = std::result::Result<T, PromptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_has_correct_exit_code() {
        let err = PromptError::Validation("missing title".to_string());
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
    }

    #[test]
    fn parse_error_has_correct_exit_code() {
        let err = PromptError::Parse("bad markup".to_string());
        assert_eq!(err.exit_code(), exit_codes::PARSE_FAILURE);
    }

    #[test]
    fn convert_error_has_correct_exit_code() {
        let err = PromptError::Convert("bad document".to_string());
        assert_eq!(err.exit_code(), exit_codes::CONVERSION_FAILURE);
    }

    #[test]
    fn render_error_has_correct_exit_code() {
        let err = PromptError::Render("missing variable".to_string());
        assert_eq!(err.exit_code(), exit_codes::RENDER_FAILURE);
    }

    #[test]
    fn messages_carry_operation_prefix_and_cause() {
        let err = PromptError::Validation("template references undeclared variable 'x'".to_string());
        assert_eq!(
            err.to_string(),
            "Validation failed: template references undeclared variable 'x'"
        );

        let err = PromptError::Render("missing required variable 'name'".to_string());
        assert_eq!(err.to_string(), "Render failed: missing required variable 'name'");
    }
}
