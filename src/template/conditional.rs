//! Conditional directives: equality-gated selection of named parts.
//!
//! A directive is a self-closing tag embedded in the template body:
//!
//! ```text
//! <if var="tone" equals="formal" show="formal-intro" else="casual-intro"/>
//! ```
//!
//! The `else` attribute is optional and the attribute order is fixed. The
//! model is single-level and flat: no nesting, no boolean composition, no
//! loops, and content substituted from a part is not rescanned.

use crate::document::Part;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static DIRECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<if\s+var="([^"]*)"\s+equals="([^"]*)"\s+show="([^"]*)"(?:\s+else="([^"]*)")?\s*/>"#)
        .expect("Invalid directive regex")
});

/// A parsed conditional directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Variable whose resolved value is compared.
    pub var: String,
    /// Comparison literal, matched with exact string equality.
    pub equals: String,
    /// Part selected on a match.
    pub show: String,
    /// Part selected on a mismatch, if any.
    pub else_part: Option<String>,
}

/// Find every conditional directive in a template, in occurrence order.
pub fn find_directives(template: &str) -> Vec<Directive> {
    DIRECTIVE_REGEX
        .captures_iter(template)
        .map(|caps| Directive {
            var: caps[1].to_string(),
            equals: caps[2].to_string(),
            show: caps[3].to_string(),
            else_part: caps.get(4).map(|m| m.as_str().to_string()),
        })
        .collect()
}

/// Replace every conditional directive with the selected part's content.
///
/// The resolved value of `var` is compared against the `equals` literal. On
/// a match the directive becomes the `show` part's content; on a mismatch it
/// becomes the `else` part's content when one is named, otherwise the empty
/// string. A part name with no matching part also becomes the empty string:
/// dangling references are a validation-time rejection, not a render-time
/// failure.
///
/// All directives are replaced in one left-to-right pass. Substituted part
/// content is not rescanned for further directives.
pub fn process_conditionals(
    template: &str,
    resolved: &HashMap<String, String>,
    parts: &[Part],
) -> String {
    DIRECTIVE_REGEX
        .replace_all(template, |caps: &Captures| {
            let matched = resolved
                .get(&caps[1])
                .is_some_and(|value| value.as_str() == &caps[2]);

            let selected = if matched {
                caps.get(3).map(|m| m.as_str())
            } else {
                caps.get(4).map(|m| m.as_str())
            };

            selected
                .and_then(|name| parts.iter().find(|p| p.name == name))
                .map(|p| p.content.clone())
                .unwrap_or_default()
        })
        .into_owned()
}
