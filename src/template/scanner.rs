//! Template scanning for `{{variable}}` tokens.

use regex::Regex;
use std::sync::LazyLock;

/// Matches a `{{name}}` token. The inner name may not contain `}`, so a
/// token always closes at the first following `}}`.
pub(crate) static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^}]*)\}\}").expect("Invalid token regex"));

/// Extract every variable reference from a template.
///
/// Returns the trimmed inner text of each `{{...}}` token in order of first
/// character position. A variable referenced three times yields three
/// entries. Tokens do not nest.
///
/// # Example
///
/// ```
/// use promptml::template::extract_variables;
///
/// let names = extract_variables("{{greeting}} {{ name }}, {{greeting}}");
/// assert_eq!(names, vec!["greeting", "name", "greeting"]);
/// ```
pub fn extract_variables(template: &str) -> Vec<String> {
    TOKEN_REGEX
        .captures_iter(template)
        .map(|caps| caps[1].trim().to_string())
        .collect()
}
