//! In-memory completion client for pipeline tests.

use std::sync::Mutex;

use crate::engine::llm_client::{CompletionClient, CompletionError};

type Script = Box<dyn Fn(&str) -> Result<String, CompletionError> + Send>;

/// Answers each prompt with a scripted reply and records what it was sent.
pub struct ScriptedClient {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new(
        script: impl Fn(&str) -> Result<String, CompletionError> + Send + 'static,
    ) -> Self {
        Self {
            script: Box::new(script),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn http_error(status: u16) -> CompletionError {
        CompletionError::HttpStatus {
            status,
            body: String::new(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl CompletionClient for ScriptedClient {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.script)(prompt)
    }

    fn test_connection(&self) -> anyhow::Result<String> {
        Ok("Connected (scripted)".to_string())
    }
}
