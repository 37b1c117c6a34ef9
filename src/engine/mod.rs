pub mod engine;
pub mod protocol;

pub mod evaluation;
pub mod judgment_parser;
pub mod llm_client;
pub mod orchestrator;
pub mod template;

#[cfg(test)]
pub mod testing;
