use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::model::cell::{CellKey, CellResult};
use crate::model::export::ExportDocument;
use crate::model::feedback::{Feedback, Vote};
use crate::model::grid_event::{GridEvent, RunPass};
use crate::model::prompt::{EvaluatorSpec, PromptSpec};
use crate::model::variables::VariableRow;

/// The session's single source of truth.
/// Owned by the UI thread; the engine only changes it through `GridEvent`s.
#[derive(Debug)]
pub struct GridState {
    variables: Vec<VariableRow>,
    prompts: Vec<PromptSpec>,
    evaluators: Vec<EvaluatorSpec>,

    results: BTreeMap<CellKey, CellResult>,
    feedback: BTreeMap<CellKey, Feedback>,
    processed: BTreeSet<CellKey>,

    active: Option<CellKey>,
    running: Option<RunPass>,
}

impl Default for GridState {
    fn default() -> Self {
        let variables: Vec<VariableRow> = (1..=3)
            .map(|n| {
                let hero = if n == 1 { "yoda".to_string() } else { format!("yoda{}", n) };
                [
                    ("var1", format!("{} jumped high", hero)),
                    ("vartwo", "but had to fly".to_string()),
                    ("varthreeee", "before vader".to_string()),
                ]
                .into_iter()
                .collect::<VariableRow>()
            })
            .collect();

        Self::new(
            variables,
            vec![
                PromptSpec::new("Translate to italian", "the prompt"),
                PromptSpec::new("Translate to swedish", "another prompt"),
            ],
            Vec::new(),
        )
    }
}

impl GridState {
    pub fn new(
        variables: Vec<VariableRow>,
        prompts: Vec<PromptSpec>,
        evaluators: Vec<EvaluatorSpec>,
    ) -> Self {
        Self {
            variables,
            prompts,
            evaluators,
            results: BTreeMap::new(),
            feedback: BTreeMap::new(),
            processed: BTreeSet::new(),
            active: None,
            running: None,
        }
    }

    /* =========================
       Loaded inputs
       ========================= */

    pub fn variables(&self) -> &[VariableRow] {
        &self.variables
    }

    pub fn prompts(&self) -> &[PromptSpec] {
        &self.prompts
    }

    pub fn evaluators(&self) -> &[EvaluatorSpec] {
        &self.evaluators
    }

    /// Column names taken from the first row.
    pub fn column_names(&self) -> Vec<&str> {
        self.variables
            .first()
            .map(|row| row.names().collect())
            .unwrap_or_default()
    }

    pub fn replace_variables(&mut self, variables: Vec<VariableRow>) {
        self.variables = variables;
        self.purge_stale();
    }

    pub fn replace_prompts(&mut self, prompts: Vec<PromptSpec>) {
        self.prompts = prompts;
        self.purge_stale();
    }

    pub fn replace_evaluators(&mut self, evaluators: Vec<EvaluatorSpec>) {
        self.evaluators = evaluators;
    }

    // Entries outside the current matrix are unreachable from the UI.
    fn purge_stale(&mut self) {
        let (rows, prompts) = (self.variables.len(), self.prompts.len());
        let before = self.results.len() + self.feedback.len() + self.processed.len();

        self.results.retain(|k, _| k.in_bounds(rows, prompts));
        self.feedback.retain(|k, _| k.in_bounds(rows, prompts));
        self.processed.retain(|k| k.in_bounds(rows, prompts));

        let removed = before - (self.results.len() + self.feedback.len() + self.processed.len());
        if removed > 0 {
            debug!(removed, rows, prompts, "purged out-of-range cell entries");
        }
    }

    /* =========================
       Run progress
       ========================= */

    pub fn begin_run(&mut self, pass: RunPass) {
        self.running = Some(pass);
    }

    pub fn running(&self) -> Option<RunPass> {
        self.running
    }

    pub fn active_cell(&self) -> Option<CellKey> {
        self.active
    }

    pub fn apply(&mut self, event: GridEvent) {
        match event {
            GridEvent::CellStarted(key) => {
                if self.accepts(key) {
                    self.active = Some(key);
                }
            }

            GridEvent::CellCompleted { key, result } => {
                if self.accepts(key) {
                    self.results.insert(key, result);
                    self.processed.insert(key);
                }
            }

            GridEvent::EvaluationsReplaced { key, evaluations } => {
                if !self.accepts(key) {
                    return;
                }
                match self.results.get_mut(&key) {
                    Some(cell) => cell.evaluations = evaluations,
                    None => warn!(cell = %key, "evaluations for a cell with no result"),
                }
            }

            GridEvent::RunFinished { .. } => {
                self.active = None;
                self.running = None;
            }
        }
    }

    pub fn contains(&self, key: CellKey) -> bool {
        key.in_bounds(self.variables.len(), self.prompts.len())
    }

    fn accepts(&self, key: CellKey) -> bool {
        let ok = self.contains(key);
        if !ok {
            warn!(cell = %key, "ignoring write to out-of-range cell");
        }
        ok
    }

    /* =========================
       Per-cell reads
       ========================= */

    pub fn result(&self, key: CellKey) -> Option<&CellResult> {
        self.results.get(&key)
    }

    pub fn feedback(&self, key: CellKey) -> Option<&Feedback> {
        self.feedback.get(&key)
    }

    pub fn is_processed(&self, key: CellKey) -> bool {
        self.processed.contains(&key)
    }

    /// Every stored output, failure sentinels included, to feed an
    /// evaluation-only pass.
    pub fn stored_outputs(&self) -> Vec<(CellKey, String)> {
        self.results
            .iter()
            .map(|(key, cell)| (*key, cell.output().to_string()))
            .collect()
    }

    /* =========================
       Feedback
       ========================= */

    pub fn vote(&mut self, key: CellKey, vote: Vote) {
        if self.accepts(key) {
            self.feedback.entry(key).or_default().toggle_vote(vote);
        }
    }

    pub fn comment(&mut self, key: CellKey, comment: &str) {
        if self.accepts(key) {
            self.feedback.entry(key).or_default().set_comment(comment);
        }
    }

    pub fn export(&self) -> ExportDocument<'_> {
        let mut results: BTreeMap<usize, BTreeMap<usize, &CellResult>> = BTreeMap::new();
        for (key, cell) in &self.results {
            results.entry(key.row).or_default().insert(key.prompt, cell);
        }

        ExportDocument {
            variables: &self.variables,
            prompts: &self.prompts,
            evaluators: &self.evaluators,
            results,
            user_feedback: self.feedback.iter().map(|(k, f)| (k.to_string(), f)).collect(),
        }
    }
}
