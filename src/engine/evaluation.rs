use tracing::{debug, warn};

use crate::engine::judgment_parser::parse_judgment;
use crate::engine::llm_client::CompletionClient;
use crate::engine::template::{render, PROMPT_RESULT};
use crate::model::judgment::Judgment;
use crate::model::prompt::EvaluatorSpec;
use crate::model::variables::VariableRow;

/// Runs every evaluator, in order, against one generated output.
///
/// Always returns one judgment per evaluator. A failed call or unparseable
/// reply only affects that evaluator's slot.
pub fn run_evaluators(
    client: &dyn CompletionClient,
    output: &str,
    row: &VariableRow,
    evaluators: &[EvaluatorSpec],
) -> Vec<Judgment> {
    evaluators
        .iter()
        .map(|evaluator| {
            let prompt = render(&evaluator.template, row, &[(PROMPT_RESULT, output)]);

            match client.complete(&prompt) {
                Ok(reply) => {
                    debug!(evaluator = %evaluator.name, "evaluator replied");
                    parse_judgment(&reply, &evaluator.name)
                }
                Err(err) => {
                    warn!(evaluator = %evaluator.name, "evaluator call failed: {}", err);
                    Judgment::failed(&evaluator.name, err)
                }
            }
        })
        .collect()
}
