use std::sync::mpsc::{Receiver, Sender};

use tracing::{debug, info};

use crate::engine::llm_client::CompletionClient;
use crate::engine::orchestrator::Orchestrator;
use crate::engine::protocol::{EngineCommand, EngineResponse};

/// Background worker. Executes one command at a time; a run in progress is
/// never interrupted, later commands queue behind it.
pub struct Engine {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    client: Box<dyn CompletionClient + Send>,
}

impl Engine {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        client: Box<dyn CompletionClient + Send>,
    ) -> Self {
        Self { rx, tx, client }
    }

    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            let orchestrator = Orchestrator::new(self.client.as_ref());
            let tx = &self.tx;
            let mut emit = |event| {
                let _ = tx.send(EngineResponse::Grid(event));
            };

            match cmd {
                EngineCommand::RunGeneration {
                    rows,
                    prompts,
                    evaluators,
                } => {
                    orchestrator.run_generation(&rows, &prompts, &evaluators, &mut emit);
                }

                EngineCommand::RunEvaluation {
                    rows,
                    prompts,
                    evaluators,
                    outputs,
                } => {
                    orchestrator.run_evaluation_only(
                        &rows,
                        &prompts,
                        &evaluators,
                        &outputs,
                        &mut emit,
                    );
                }

                EngineCommand::TestConnection => {
                    let status = self.client.test_connection().map_err(|e| format!("{:#}", e));
                    debug!(?status, "connection check");
                    let _ = self.tx.send(EngineResponse::ConnectionStatus(status));
                }
            }
        }

        info!("command channel closed, engine stopping");
    }
}
