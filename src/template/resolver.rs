//! Variable resolution: declared specs reconciled against supplied values.

use crate::document::Variable;
use anyhow::{Result, bail};
use std::collections::HashMap;

/// Resolve declared variables against caller-supplied input values.
///
/// Variables are processed in declaration order. A key present in `input`
/// wins even when its value is an empty string; an absent required variable
/// fails immediately naming that variable; an absent optional variable takes
/// its declared default. Input keys that match no declared variable are
/// ignored, and the result contains exactly the declared names.
///
/// With duplicate declarations of one name, the later declaration's value
/// overwrites the earlier one in the result.
///
/// # Errors
///
/// Fails on the first required variable (in declaration order) missing from
/// `input`.
pub fn resolve(
    declared: &[Variable],
    input: &HashMap<String, String>,
) -> Result<HashMap<String, String>> {
    let mut resolved = HashMap::with_capacity(declared.len());

    for variable in declared {
        if let Some(value) = input.get(&variable.name) {
            resolved.insert(variable.name.clone(), value.clone());
        } else if variable.required {
            bail!("missing required variable '{}'", variable.name);
        } else {
            // Validation rejects optional variables without a default; if one
            // slips through anyway it resolves to the empty string.
            let default = variable.default.clone().unwrap_or_default();
            resolved.insert(variable.name.clone(), default);
        }
    }

    Ok(resolved)
}
