//! Token substitution: `{{name}}` replaced by resolved values.

use super::scanner::TOKEN_REGEX;
use regex::Captures;
use std::collections::HashMap;

/// Replace `{{name}}` tokens with their resolved values.
///
/// The inner name is trimmed before lookup, matching the scanner. A token is
/// replaced only when the name resolves to a non-empty string; an empty
/// resolved value or an unknown name leaves the token, braces included,
/// verbatim in the output. An explicitly supplied empty string therefore
/// renders as the literal placeholder, not as blank text.
pub fn substitute(template: &str, resolved: &HashMap<String, String>) -> String {
    TOKEN_REGEX
        .replace_all(template, |caps: &Captures| {
            let name = caps[1].trim();
            match resolved.get(name) {
                Some(value) if !value.is_empty() => value.clone(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}
