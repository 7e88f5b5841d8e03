//! Rendering facade: validate, resolve, select parts, substitute.
//!
//! Rendering sequences the template subsystem over an immutable document:
//! validation first, then variable resolution, then conditional part
//! selection over the whitespace-trimmed template, then token substitution.
//! Nothing mutates the document; every step produces derived values only.

use crate::document::Document;
use crate::error::PromptError;
use crate::template::{process_conditionals, resolve, substitute};
use crate::validate::check_document;
use crate::xml::parse_xml;
use std::collections::HashMap;

/// Render a document to final text with the supplied variable values.
///
/// # Errors
///
/// Fails with [`PromptError::Render`] when the document is invalid or a
/// required variable is missing from `input`.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use promptml::{Document, Variable, render_document};
///
/// let doc = Document {
///     metadata: [("title", "Greeting")].into_iter().collect(),
///     variables: vec![
///         Variable::required("name"),
///         Variable::optional("greeting", "Hello"),
///     ],
///     parts: vec![],
///     template: "{{greeting}} {{name}}!".to_string(),
/// };
///
/// let mut input = HashMap::new();
/// input.insert("name".to_string(), "Alice".to_string());
/// assert_eq!(render_document(&doc, &input).unwrap(), "Hello Alice!");
/// ```
pub fn render_document(
    doc: &Document,
    input: &HashMap<String, String>,
) -> crate::error::Result<String> {
    render_inner(doc, input).map_err(|e| PromptError::Render(format!("{e:#}")))
}

/// Parse prompt XML and render it in one step.
///
/// # Errors
///
/// Fails with [`PromptError::Render`]; a parse failure of the source text is
/// reported under the render prefix since rendering is the operation that
/// was requested.
pub fn render_str(xml: &str, input: &HashMap<String, String>) -> crate::error::Result<String> {
    let run = || -> anyhow::Result<String> {
        let doc = parse_xml(xml)?;
        render_inner(&doc, input)
    };
    run().map_err(|e| PromptError::Render(format!("{e:#}")))
}

fn render_inner(doc: &Document, input: &HashMap<String, String>) -> anyhow::Result<String> {
    check_document(doc)?;
    let resolved = resolve(&doc.variables, input)?;
    let template = doc.template.trim();
    let selected = process_conditionals(template, &resolved, &doc.parts);
    Ok(substitute(&selected, &resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Part, Variable};

    fn input(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn greeting_doc() -> Document {
        Document {
            metadata: [("title", "Greeting")].into_iter().collect(),
            variables: vec![
                Variable::required("name"),
                Variable::optional("greeting", "Hello"),
            ],
            parts: vec![],
            template: "{{greeting}} {{name}}!".to_string(),
        }
    }

    #[test]
    fn renders_with_defaults_applied() {
        let out = render_document(&greeting_doc(), &input(&[("name", "Alice")])).unwrap();
        assert_eq!(out, "Hello Alice!");
    }

    #[test]
    fn supplied_values_override_defaults() {
        let out = render_document(
            &greeting_doc(),
            &input(&[("name", "Alice"), ("greeting", "Howdy")]),
        )
        .unwrap();
        assert_eq!(out, "Howdy Alice!");
    }

    #[test]
    fn missing_required_variable_fails_with_render_prefix() {
        let err = render_document(&greeting_doc(), &input(&[])).unwrap_err();
        assert!(err.to_string().starts_with("Render failed: "), "got: {err}");
        assert!(err.to_string().contains("'name'"), "got: {err}");
    }

    #[test]
    fn invalid_document_fails_under_the_render_prefix_without_stacking() {
        let doc = Document {
            template: "{{x}}".to_string(),
            ..Document::default()
        };
        let err = render_document(&doc, &input(&[])).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Render failed: "), "got: {message}");
        assert!(!message.contains("Validation failed"), "got: {message}");
    }

    #[test]
    fn template_is_trimmed_before_rendering() {
        let doc = Document {
            template: "\n  {{greeting}} {{name}}!  \n".to_string(),
            ..greeting_doc()
        };
        let out = render_document(&doc, &input(&[("name", "Alice")])).unwrap();
        assert_eq!(out, "Hello Alice!");
    }

    #[test]
    fn interior_whitespace_survives_the_trim() {
        let doc = Document {
            template: "  line one\n\nline {{name}}  ".to_string(),
            variables: vec![Variable::required("name")],
            ..greeting_doc()
        };
        let out = render_document(&doc, &input(&[("name", "two")])).unwrap();
        assert_eq!(out, "line one\n\nline two");
    }

    #[test]
    fn conditionals_run_before_substitution() {
        // Part content may carry tokens; they substitute in the same pass.
        let doc = Document {
            metadata: [("title", "T")].into_iter().collect(),
            variables: vec![
                Variable::required("name"),
                Variable::optional("tone", "casual"),
            ],
            parts: vec![
                Part::new("formal", "Dear {{name}},"),
                Part::new("casual", "Hey {{name}},"),
            ],
            template: r#"<if var="tone" equals="formal" show="formal" else="casual"/> welcome"#
                .to_string(),
        };

        let out = render_document(&doc, &input(&[("name", "Alice"), ("tone", "formal")])).unwrap();
        assert_eq!(out, "Dear Alice, welcome");

        let out = render_document(&doc, &input(&[("name", "Alice")])).unwrap();
        assert_eq!(out, "Hey Alice, welcome");
    }

    #[test]
    fn explicit_empty_value_renders_the_literal_token() {
        let out = render_document(
            &greeting_doc(),
            &input(&[("name", ""), ("greeting", "Hi")]),
        )
        .unwrap();
        assert_eq!(out, "Hi {{name}}!");
    }

    #[test]
    fn render_str_parses_then_renders() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<prompt>
  <metadata><title>Greeting</title></metadata>
  <variables>
    <var name="name" required="true"/>
    <var name="greeting" required="false">Hello</var>
  </variables>
  <template>{{greeting}} {{name}}!</template>
</prompt>"#;
        let out = render_str(xml, &input(&[("name", "Alice")])).unwrap();
        assert_eq!(out, "Hello Alice!");
    }

    #[test]
    fn render_str_reports_bad_markup_under_the_render_prefix() {
        let err = render_str("<prompt><metadata>", &input(&[])).unwrap_err();
        assert!(err.to_string().starts_with("Render failed: "), "got: {err}");
    }

    #[test]
    fn rendering_leaves_the_document_untouched() {
        let doc = greeting_doc();
        let before = doc.clone();
        let _ = render_document(&doc, &input(&[("name", "Alice")]));
        assert_eq!(doc, before);
    }
}
