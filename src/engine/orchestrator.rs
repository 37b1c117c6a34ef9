use std::collections::HashMap;

use tracing::{info, info_span, warn};

use crate::engine::evaluation::run_evaluators;
use crate::engine::llm_client::CompletionClient;
use crate::engine::template::render;
use crate::model::cell::{CellKey, CellResult};
use crate::model::grid_event::{GridEvent, RunPass};
use crate::model::prompt::{EvaluatorSpec, PromptSpec};
use crate::model::variables::VariableRow;

/// Walks the row x prompt grid one cell at a time, row-major, reporting
/// progress through `emit`.
pub struct Orchestrator<'a> {
    client: &'a dyn CompletionClient,
}

impl<'a> Orchestrator<'a> {
    pub fn new(client: &'a dyn CompletionClient) -> Self {
        Self { client }
    }

    /// Generate every cell, then judge each successful output.
    ///
    /// A failed generation is stored as a failed cell and never evaluated.
    /// Nothing here aborts the run.
    pub fn run_generation(
        &self,
        rows: &[VariableRow],
        prompts: &[PromptSpec],
        evaluators: &[EvaluatorSpec],
        emit: &mut dyn FnMut(GridEvent),
    ) {
        let _span = info_span!("generation", rows = rows.len(), prompts = prompts.len()).entered();
        info!(evaluators = evaluators.len(), "starting generation pass");

        for (row_index, row) in rows.iter().enumerate() {
            for (prompt_index, prompt) in prompts.iter().enumerate() {
                let key = CellKey::new(row_index, prompt_index);
                emit(GridEvent::CellStarted(key));

                let text = render(&prompt.template, row, &[]);
                let result = match self.client.complete(&text) {
                    Ok(output) => {
                        let evaluations = run_evaluators(self.client, &output, row, evaluators);
                        info!(cell = %key, judgments = evaluations.len(), "cell generated");
                        CellResult::generated(output, evaluations)
                    }
                    Err(err) => {
                        warn!(cell = %key, "generation failed: {}", err);
                        CellResult::failed(err.to_string())
                    }
                };

                emit(GridEvent::CellCompleted { key, result });
            }
        }

        info!("generation pass finished");
        emit(GridEvent::RunFinished {
            pass: RunPass::Generation,
        });
    }

    /// Re-judge outputs that already exist, replacing each cell's judgments.
    /// Cells with no stored output (never generated) are skipped.
    pub fn run_evaluation_only(
        &self,
        rows: &[VariableRow],
        prompts: &[PromptSpec],
        evaluators: &[EvaluatorSpec],
        outputs: &[(CellKey, String)],
        emit: &mut dyn FnMut(GridEvent),
    ) {
        let _span = info_span!("evaluation", outputs = outputs.len()).entered();
        info!(evaluators = evaluators.len(), "starting evaluation pass");

        let outputs: HashMap<CellKey, &str> =
            outputs.iter().map(|(k, o)| (*k, o.as_str())).collect();

        for (row_index, row) in rows.iter().enumerate() {
            for prompt_index in 0..prompts.len() {
                let key = CellKey::new(row_index, prompt_index);
                let Some(output) = outputs.get(&key) else {
                    continue;
                };

                let evaluations = run_evaluators(self.client, output, row, evaluators);
                emit(GridEvent::EvaluationsReplaced { key, evaluations });
            }
        }

        info!("evaluation pass finished");
        emit(GridEvent::RunFinished {
            pass: RunPass::Evaluation,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::ScriptedClient;
    use crate::model::cell::FAILED_OUTPUT;
    use crate::model::grid_state::GridState;

    fn rows(n: usize) -> Vec<VariableRow> {
        (0..n)
            .map(|i| [("name", format!("row{}", i))].into_iter().collect())
            .collect()
    }

    fn prompts(n: usize) -> Vec<PromptSpec> {
        (0..n)
            .map(|i| PromptSpec::new(format!("p{} {{{{name}}}}", i), ""))
            .collect()
    }

    fn judge() -> EvaluatorSpec {
        EvaluatorSpec::new("judge: {{PROMPTRESULT}}", "judge")
    }

    fn collect(run: impl FnOnce(&mut dyn FnMut(GridEvent))) -> Vec<GridEvent> {
        let mut events = Vec::new();
        run(&mut |e| events.push(e));
        events
    }

    #[test]
    fn cells_complete_in_row_major_order() {
        let client = ScriptedClient::new(|p| Ok(format!("out({})", p)));
        let orchestrator = Orchestrator::new(&client);

        let events = collect(|emit| orchestrator.run_generation(&rows(2), &prompts(2), &[], emit));

        let completed: Vec<CellKey> = events
            .iter()
            .filter_map(|e| match e {
                GridEvent::CellCompleted { key, .. } => Some(*key),
                _ => None,
            })
            .collect();
        assert_eq!(
            completed,
            vec![CellKey::new(0, 0), CellKey::new(0, 1), CellKey::new(1, 0), CellKey::new(1, 1)]
        );
        assert_eq!(events.first(), Some(&GridEvent::CellStarted(CellKey::new(0, 0))));
        assert_eq!(events.last(), Some(&GridEvent::RunFinished { pass: RunPass::Generation }));
        assert_eq!(client.prompts(), vec!["p0 row0", "p1 row0", "p0 row1", "p1 row1"]);
    }

    #[test]
    fn generation_output_is_evaluated() {
        let client = ScriptedClient::new(|p| {
            if p.starts_with("judge:") {
                Ok(r#"{"score": 5, "why": "good"}"#.to_string())
            } else {
                Ok("ciao".to_string())
            }
        });
        let orchestrator = Orchestrator::new(&client);

        let events =
            collect(|emit| orchestrator.run_generation(&rows(1), &prompts(1), &[judge()], emit));

        let GridEvent::CellCompleted { result, .. } = &events[1] else {
            panic!("expected completion, got {:?}", events[1]);
        };
        assert_eq!(result.output(), "ciao");
        assert_eq!(result.evaluations.len(), 1);
        assert_eq!(result.evaluations[0].score.value(), Some(5.0));
        assert_eq!(client.prompts()[1], "judge: ciao");
    }

    #[test]
    fn failed_generation_skips_evaluation() {
        let client = ScriptedClient::new(|_| Err(ScriptedClient::http_error(500)));
        let orchestrator = Orchestrator::new(&client);

        let events =
            collect(|emit| orchestrator.run_generation(&rows(1), &prompts(1), &[judge()], emit));

        let GridEvent::CellCompleted { result, .. } = &events[1] else {
            panic!("expected completion, got {:?}", events[1]);
        };
        assert!(result.is_failed());
        assert_eq!(result.output(), FAILED_OUTPUT);
        assert_eq!(result.diagnostic(), "Error: HTTP error! status: 500");
        assert!(result.evaluations.is_empty());
        assert_eq!(client.prompts().len(), 1);
    }

    #[test]
    fn applying_events_marks_every_cell_processed() {
        let client = ScriptedClient::new(|_| Ok("x".to_string()));
        let orchestrator = Orchestrator::new(&client);
        let mut state = GridState::new(rows(2), prompts(2), Vec::new());

        orchestrator.run_generation(&rows(2), &prompts(2), &[], &mut |e| state.apply(e));

        for r in 0..2 {
            for p in 0..2 {
                assert!(state.is_processed(CellKey::new(r, p)));
            }
        }
        assert_eq!(state.active_cell(), None);
    }

    #[test]
    fn evaluation_only_rejudges_stored_outputs() {
        let client = ScriptedClient::new(|_| Ok(r#"{"score": 1, "why": "meh"}"#.to_string()));
        let orchestrator = Orchestrator::new(&client);
        let outputs = vec![(CellKey::new(1, 0), "stored".to_string())];

        let events = collect(|emit| {
            orchestrator.run_evaluation_only(&rows(2), &prompts(2), &[judge()], &outputs, emit)
        });

        assert_eq!(events.len(), 2);
        match &events[0] {
            GridEvent::EvaluationsReplaced { key, evaluations } => {
                assert_eq!(*key, CellKey::new(1, 0));
                assert_eq!(evaluations.len(), 1);
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert!(!events.iter().any(|e| matches!(e, GridEvent::CellStarted(_))));
        assert_eq!(client.prompts(), vec!["judge: stored"]);
    }

    #[test]
    fn evaluation_only_judges_failure_sentinel() {
        let failing = ScriptedClient::new(|_| Err(ScriptedClient::http_error(500)));
        let mut state = GridState::default();
        let (rows, prompts) = (rows(1), prompts(1));
        state.replace_variables(rows.clone());
        state.replace_prompts(prompts.clone());
        Orchestrator::new(&failing).run_generation(&rows, &prompts, &[], &mut |e| state.apply(e));

        let judge_client =
            ScriptedClient::new(|_| Ok(r#"{"score": 0, "why": "error text"}"#.to_string()));
        Orchestrator::new(&judge_client).run_evaluation_only(
            &rows,
            &prompts,
            &[judge()],
            &state.stored_outputs(),
            &mut |e| state.apply(e),
        );

        assert_eq!(judge_client.prompts(), vec![format!("judge: {}", FAILED_OUTPUT)]);
        let cell = state.result(CellKey::new(0, 0)).unwrap();
        assert!(cell.is_failed());
        assert_eq!(cell.evaluations[0].score.value(), Some(0.0));
    }
}
