use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::variables::VariableRow;

/// Reserved placeholder bound to the output under evaluation.
pub const PROMPT_RESULT: &str = "PROMPTRESULT";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("Invalid regex pattern"));

/// Substitute `{{name}}` placeholders.
///
/// `extra` wins over `row`; names found in neither become the empty string.
/// Substituted text is not scanned again.
pub fn render(template: &str, row: &VariableRow, extra: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            extra
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| *v)
                .or_else(|| row.get(name))
                .unwrap_or_default()
                .to_string()
        })
        .into_owned()
}
