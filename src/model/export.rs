use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::cell::CellResult;
use crate::model::feedback::Feedback;
use crate::model::prompt::{EvaluatorSpec, PromptSpec};
use crate::model::variables::VariableRow;

/// Snapshot of a session written by "Save Results".
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    pub variables: &'a [VariableRow],
    pub prompts: &'a [PromptSpec],
    pub evaluators: &'a [EvaluatorSpec],
    /// row index -> prompt index -> cell
    pub results: BTreeMap<usize, BTreeMap<usize, &'a CellResult>>,
    /// keyed `"<row>-<prompt>"`
    pub user_feedback: BTreeMap<String, &'a Feedback>,
}

impl ExportDocument<'_> {
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
