use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::model::grid_state::GridState;
use crate::model::prompt::{EvaluatorSpec, PromptSpec};
use crate::model::tsv::parse_tsv;

pub const EXPORT_FILE_NAME: &str = "prompt_evaluation_results.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Variables,
    Prompts,
    Evaluators,
}

impl TableKind {
    pub fn label(&self) -> &'static str {
        match self {
            TableKind::Variables => "Load Variables",
            TableKind::Prompts => "Load Prompts",
            TableKind::Evaluators => "Load Evaluators",
        }
    }
}

pub fn pick_tsv(kind: TableKind) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title(kind.label())
        .add_filter("Tab-separated values", &["tsv"])
        .pick_file()
}

pub fn pick_export_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("JSON", &["json"])
        .save_file()
}

/// Replace one of the loaded tables with the contents of a TSV file.
/// Returns the number of rows loaded.
pub fn load_table(state: &mut GridState, kind: TableKind, path: &Path) -> anyhow::Result<usize> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let rows = parse_tsv(&text);
    let count = rows.len();

    match kind {
        TableKind::Variables => state.replace_variables(rows),
        TableKind::Prompts => {
            state.replace_prompts(rows.iter().map(PromptSpec::from_row).collect())
        }
        TableKind::Evaluators => {
            state.replace_evaluators(rows.iter().map(EvaluatorSpec::from_row).collect())
        }
    }

    info!(?kind, count, path = %path.display(), "table loaded");
    Ok(count)
}

pub fn write_export(state: &GridState, path: &Path) -> anyhow::Result<()> {
    let json = state.export().to_pretty_json().context("serializing results")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;

    info!(path = %path.display(), "results saved");
    Ok(())
}
