use serde::{Deserialize, Serialize};

use crate::model::variables::VariableRow;

/// A templated task prompt. Its index in the loaded list is its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptSpec {
    #[serde(rename = "prompt")]
    pub template: String,
    pub comment: String,
}

/// A templated judge prompt. `{{PROMPTRESULT}}` is bound to the output
/// being judged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorSpec {
    #[serde(rename = "prompt")]
    pub template: String,
    #[serde(rename = "evalname")]
    pub name: String,
}

impl PromptSpec {
    pub fn new(template: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            comment: comment.into(),
        }
    }

    /// Reads the `prompt` and `comment` columns of an uploaded row.
    pub fn from_row(row: &VariableRow) -> Self {
        Self::new(
            row.get("prompt").unwrap_or_default(),
            row.get("comment").unwrap_or_default(),
        )
    }
}

impl EvaluatorSpec {
    pub fn new(template: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            name: name.into(),
        }
    }

    /// Reads the `prompt` and `evalname` columns of an uploaded row.
    pub fn from_row(row: &VariableRow) -> Self {
        Self::new(
            row.get("prompt").unwrap_or_default(),
            row.get("evalname").unwrap_or_default(),
        )
    }
}
