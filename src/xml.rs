//! XML boundary: parsing prompt markup into a [`Document`] and writing a
//! [`Document`] back out.
//!
//! # Document shape
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <prompt>
//!   <metadata>
//!     <title>Greeting</title>
//!   </metadata>
//!   <variables>
//!     <var name="name" required="true"/>
//!     <var name="greeting" required="false">Hello</var>
//!   </variables>
//!   <part name="formal">Dear valued customer,</part>
//!   <template>{{greeting}} {{name}}!</template>
//! </prompt>
//! ```
//!
//! The `<template>` element is treated as opaque text: its content is read
//! raw up to the closing tag and written back raw, so embedded `<if .../>`
//! directives and `{{tokens}}` survive byte-for-byte. All other text content
//! is XML-unescaped on read and escaped on write.
//!
//! Parsing is permissive: unknown elements are skipped and missing sections
//! produce empty fields. The validator is the strict surface that rejects
//! incomplete documents.

use crate::document::{Document, Metadata, Part, Variable};
use crate::error::PromptError;
use crate::validate::check_document;
use anyhow::{Context, bail};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Parse prompt XML into a [`Document`].
///
/// # Errors
///
/// Fails with [`PromptError::Parse`] on malformed markup, a missing or
/// unexpected root element, or a `<var>`/`<part>` without its `name`
/// attribute.
pub fn parse_document(text: &str) -> crate::error::Result<Document> {
    parse_xml(text).map_err(|e| PromptError::Parse(format!("{e:#}")))
}

/// Serialize a [`Document`] to prompt XML, preceded by the XML prolog.
///
/// The document is validated first; serializing an inconsistent document is
/// rejected rather than producing markup that cannot round-trip.
///
/// # Errors
///
/// Fails with [`PromptError::Convert`] when validation or writing fails.
pub fn document_to_xml(doc: &Document) -> crate::error::Result<String> {
    check_document(doc).map_err(|e| PromptError::Convert(e.to_string()))?;
    write_xml(doc).map_err(|e| PromptError::Convert(format!("{e:#}")))
}

pub(crate) fn parse_xml(text: &str) -> anyhow::Result<Document> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut doc = Document::default();
    let mut seen_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                if !seen_root {
                    expect_root(&element)?;
                    seen_root = true;
                    continue;
                }
                match element.name().as_ref() {
                    b"metadata" => parse_metadata(&mut reader, &mut doc.metadata)?,
                    b"variables" => parse_variables(&mut reader, &mut doc.variables)?,
                    b"part" => {
                        let name = require_attr(&element, "name")?;
                        let raw = reader.read_text(element.name())?;
                        let content = unescape(&raw)
                            .with_context(|| format!("invalid content in part '{name}'"))?
                            .into_owned();
                        doc.parts.push(Part::new(name, content));
                    }
                    // Raw to the closing tag: embedded markup stays verbatim.
                    b"template" => doc.template = reader.read_text(element.name())?.into_owned(),
                    _ => skip_element(&mut reader, &element)?,
                }
            }
            Event::Empty(element) => {
                if !seen_root {
                    expect_root(&element)?;
                    seen_root = true;
                    continue;
                }
                if element.name().as_ref() == b"part" {
                    doc.parts.push(Part::new(require_attr(&element, "name")?, ""));
                }
            }
            Event::Eof => break,
            // Whitespace between elements, comments, the prolog.
            _ => {}
        }
    }

    if !seen_root {
        bail!("document has no root element");
    }

    Ok(doc)
}

fn expect_root(element: &BytesStart) -> anyhow::Result<()> {
    if element.name().as_ref() != b"prompt" {
        bail!(
            "unexpected root element '{}', expected 'prompt'",
            element_name(element)
        );
    }
    Ok(())
}

fn parse_metadata(reader: &mut Reader<&[u8]>, metadata: &mut Metadata) -> anyhow::Result<()> {
    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                let key = element_name(&element);
                let raw = reader.read_text(element.name())?;
                let value = unescape(&raw)
                    .with_context(|| format!("invalid content in metadata '{key}'"))?
                    .into_owned();
                metadata.insert(key, value);
            }
            Event::Empty(element) => metadata.insert(element_name(&element), ""),
            Event::End(_) => return Ok(()),
            Event::Eof => bail!("unexpected end of document inside <metadata>"),
            _ => {}
        }
    }
}

fn parse_variables(reader: &mut Reader<&[u8]>, variables: &mut Vec<Variable>) -> anyhow::Result<()> {
    loop {
        match reader.read_event()? {
            Event::Start(element) if element.name().as_ref() == b"var" => {
                let name = require_attr(&element, "name")?;
                let required = var_required(&element)?;
                let raw = reader.read_text(element.name())?;
                let default = unescape(&raw)
                    .with_context(|| format!("invalid default for variable '{name}'"))?
                    .into_owned();
                variables.push(Variable {
                    name,
                    required,
                    default: Some(default),
                });
            }
            Event::Empty(element) if element.name().as_ref() == b"var" => {
                variables.push(Variable {
                    name: require_attr(&element, "name")?,
                    required: var_required(&element)?,
                    default: None,
                });
            }
            Event::Start(element) => skip_element(reader, &element)?,
            Event::End(_) => return Ok(()),
            Event::Eof => bail!("unexpected end of document inside <variables>"),
            _ => {}
        }
    }
}

/// The `required` attribute is boolean-from-string: `"true"` means required,
/// any other value (or no attribute) means optional.
fn var_required(element: &BytesStart) -> anyhow::Result<bool> {
    Ok(attr(element, "required")?.is_some_and(|v| v == "true"))
}

fn attr(element: &BytesStart, name: &str) -> anyhow::Result<Option<String>> {
    match element.try_get_attribute(name)? {
        Some(attribute) => Ok(Some(attribute.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn require_attr(element: &BytesStart, name: &str) -> anyhow::Result<String> {
    attr(element, name)?.ok_or_else(|| {
        anyhow::anyhow!(
            "<{}> element is missing the '{}' attribute",
            element_name(element),
            name
        )
    })
}

fn element_name(element: &BytesStart) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

fn skip_element(reader: &mut Reader<&[u8]>, element: &BytesStart) -> anyhow::Result<()> {
    reader.read_to_end(element.name())?;
    Ok(())
}

pub(crate) fn write_xml(doc: &Document) -> anyhow::Result<String> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;

    writer.write_event(Event::Start(BytesStart::new("prompt")))?;

    writer.write_event(Event::Start(BytesStart::new("metadata")))?;
    for (key, value) in doc.metadata.iter() {
        writer
            .create_element(key)
            .write_text_content(BytesText::new(value))?;
    }
    writer.write_event(Event::End(BytesEnd::new("metadata")))?;

    writer.write_event(Event::Start(BytesStart::new("variables")))?;
    for variable in &doc.variables {
        let element = writer
            .create_element("var")
            .with_attribute(("name", variable.name.as_str()))
            .with_attribute(("required", if variable.required { "true" } else { "false" }));
        match &variable.default {
            Some(default) => {
                element.write_text_content(BytesText::new(default))?;
            }
            None => {
                element.write_empty()?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new("variables")))?;

    for part in &doc.parts {
        writer
            .create_element("part")
            .with_attribute(("name", part.name.as_str()))
            .write_text_content(BytesText::new(&part.content))?;
    }

    // Written raw, mirroring the raw read: directives and tokens unescaped.
    writer.write_event(Event::Start(BytesStart::new("template")))?;
    writer.write_event(Event::Text(BytesText::from_escaped(doc.template.as_str())))?;
    writer.write_event(Event::End(BytesEnd::new("template")))?;

    writer.write_event(Event::End(BytesEnd::new("prompt")))?;

    String::from_utf8(writer.into_inner()).context("serialized document is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<prompt>
  <metadata>
    <title>Greeting</title>
    <author>docs team</author>
  </metadata>
  <variables>
    <var name="name" required="true"/>
    <var name="greeting" required="false">Hello</var>
    <var name="tone" required="false">casual</var>
  </variables>
  <part name="formal">Dear valued customer,</part>
  <part name="casual">Hey,</part>
  <template><if var="tone" equals="formal" show="formal" else="casual"/> {{greeting}} {{name}}!</template>
</prompt>"#;

    #[test]
    fn parses_a_full_document() {
        let doc = parse_document(FULL_DOC).unwrap();

        assert_eq!(doc.metadata.title(), Some("Greeting"));
        assert_eq!(doc.metadata.get("author"), Some("docs team"));

        assert_eq!(doc.variables.len(), 3);
        assert_eq!(doc.variables[0].name, "name");
        assert!(doc.variables[0].required);
        assert_eq!(doc.variables[0].default, None);
        assert_eq!(doc.variables[1].name, "greeting");
        assert!(!doc.variables[1].required);
        assert_eq!(doc.variables[1].default.as_deref(), Some("Hello"));

        assert_eq!(doc.parts.len(), 2);
        assert_eq!(doc.parts[0].name, "formal");
        assert_eq!(doc.parts[0].content, "Dear valued customer,");
    }

    #[test]
    fn template_markup_is_preserved_verbatim() {
        let doc = parse_document(FULL_DOC).unwrap();
        assert_eq!(
            doc.template,
            r#"<if var="tone" equals="formal" show="formal" else="casual"/> {{greeting}} {{name}}!"#
        );
    }

    #[test]
    fn single_var_and_part_normalize_to_sequences() {
        let xml = r#"<prompt>
  <metadata><title>T</title></metadata>
  <variables><var name="only" required="true"/></variables>
  <part name="solo">content</part>
  <template>{{only}}</template>
</prompt>"#;
        let doc = parse_document(xml).unwrap();
        assert_eq!(doc.variables.len(), 1);
        assert_eq!(doc.parts.len(), 1);
    }

    #[test]
    fn required_attribute_is_true_or_anything_else() {
        let xml = r#"<prompt>
  <metadata><title>T</title></metadata>
  <variables>
    <var name="a" required="true"/>
    <var name="b" required="false"/>
    <var name="c" required="yes"/>
    <var name="d"/>
  </variables>
  <template/>
</prompt>"#;
        let doc = parse_document(xml).unwrap();
        let required: Vec<bool> = doc.variables.iter().map(|v| v.required).collect();
        assert_eq!(required, vec![true, false, false, false]);
    }

    #[test]
    fn self_closing_var_has_no_default_but_empty_element_does() {
        let xml = r#"<prompt>
  <metadata><title>T</title></metadata>
  <variables>
    <var name="a" required="false"/>
    <var name="b" required="false"></var>
  </variables>
  <template/>
</prompt>"#;
        let doc = parse_document(xml).unwrap();
        assert_eq!(doc.variables[0].default, None);
        assert_eq!(doc.variables[1].default.as_deref(), Some(""));
    }

    #[test]
    fn missing_sections_parse_to_empty_fields() {
        let doc = parse_document("<prompt/>").unwrap();
        assert!(doc.metadata.is_empty());
        assert!(doc.variables.is_empty());
        assert!(doc.parts.is_empty());
        assert_eq!(doc.template, "");
    }

    #[test]
    fn unknown_elements_are_skipped() {
        let xml = r#"<prompt>
  <metadata><title>T</title></metadata>
  <experimental><nested>ignored</nested></experimental>
  <template>body</template>
</prompt>"#;
        let doc = parse_document(xml).unwrap();
        assert_eq!(doc.metadata.title(), Some("T"));
        assert_eq!(doc.template, "body");
    }

    #[test]
    fn escaped_entities_are_decoded_outside_the_template() {
        let xml = r#"<prompt>
  <metadata><title>Q &amp; A</title></metadata>
  <part name="p">a &lt; b</part>
  <template/>
</prompt>"#;
        let doc = parse_document(xml).unwrap();
        assert_eq!(doc.metadata.title(), Some("Q & A"));
        assert_eq!(doc.parts[0].content, "a < b");
    }

    #[test]
    fn var_without_name_attribute_is_a_parse_error() {
        let xml = r#"<prompt><variables><var required="true"/></variables></prompt>"#;
        let err = parse_document(xml).unwrap_err();
        assert!(err.to_string().starts_with("Parse failed: "), "got: {err}");
        assert!(err.to_string().contains("name"), "got: {err}");
    }

    #[test]
    fn wrong_root_element_is_a_parse_error() {
        let err = parse_document("<task><template/></task>").unwrap_err();
        assert!(err.to_string().contains("prompt"), "got: {err}");
    }

    #[test]
    fn malformed_markup_is_a_parse_error() {
        let err = parse_document("<prompt><metadata>").unwrap_err();
        assert!(err.to_string().starts_with("Parse failed: "), "got: {err}");
    }

    #[test]
    fn output_starts_with_the_xml_prolog() {
        let doc = parse_document(FULL_DOC).unwrap();
        let xml = document_to_xml(&doc).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    }

    #[test]
    fn round_trip_reproduces_an_equivalent_document() {
        let doc = parse_document(FULL_DOC).unwrap();
        let xml = document_to_xml(&doc).unwrap();
        let reparsed = parse_document(&xml).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn round_trip_escapes_and_restores_special_characters() {
        let doc = Document {
            metadata: [("title", "Q & A <beta>")].into_iter().collect(),
            variables: vec![Variable::optional("x", "a < b")],
            parts: vec![Part::new("p", "1 & 2")],
            template: "{{x}}".to_string(),
        };
        let xml = document_to_xml(&doc).unwrap();
        let reparsed = parse_document(&xml).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn converting_an_invalid_document_is_rejected_with_the_conversion_prefix() {
        let err = document_to_xml(&Document::default()).unwrap_err();
        assert!(
            err.to_string().starts_with("Conversion to XML failed: "),
            "got: {err}"
        );
        assert!(err.to_string().contains("title"), "got: {err}");
    }
}
