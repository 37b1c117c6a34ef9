use crate::model::cell::CellKey;
use crate::model::grid_event::GridEvent;
use crate::model::prompt::{EvaluatorSpec, PromptSpec};
use crate::model::variables::VariableRow;

pub enum EngineCommand {
    RunGeneration {
        rows: Vec<VariableRow>,
        prompts: Vec<PromptSpec>,
        evaluators: Vec<EvaluatorSpec>,
    },
    RunEvaluation {
        rows: Vec<VariableRow>,
        prompts: Vec<PromptSpec>,
        evaluators: Vec<EvaluatorSpec>,
        outputs: Vec<(CellKey, String)>,
    },
    TestConnection,
}

pub enum EngineResponse {
    Grid(GridEvent),
    ConnectionStatus(Result<String, String>),
}
