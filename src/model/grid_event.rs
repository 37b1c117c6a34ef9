use crate::model::cell::{CellKey, CellResult};
use crate::model::judgment::Judgment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPass {
    Generation,
    Evaluation,
}

/// Progress reported by the engine while it walks the grid.
/// Applied to `GridState` in the order received.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    CellStarted(CellKey),
    CellCompleted {
        key: CellKey,
        result: CellResult,
    },
    EvaluationsReplaced {
        key: CellKey,
        evaluations: Vec<Judgment>,
    },
    RunFinished {
        pass: RunPass,
    },
}
