use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::model::judgment::Judgment;

/// Output shown in place of a generation that failed.
pub const FAILED_OUTPUT: &str = "Error executing prompt";

/// Grid coordinate: (row of variables, prompt column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    pub row: usize,
    pub prompt: usize,
}

impl CellKey {
    pub fn new(row: usize, prompt: usize) -> Self {
        Self { row, prompt }
    }

    pub fn in_bounds(&self, rows: usize, prompts: usize) -> bool {
        self.row < rows && self.prompt < prompts
    }
}

impl std::fmt::Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.row, self.prompt)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Generation {
    Generated { output: String },
    Failed { diagnostic: String },
}

/// Everything stored for one cell after a generation attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct CellResult {
    pub generation: Generation,
    pub evaluations: Vec<Judgment>,
}

impl CellResult {
    pub fn generated(output: impl Into<String>, evaluations: Vec<Judgment>) -> Self {
        Self {
            generation: Generation::Generated {
                output: output.into(),
            },
            evaluations,
        }
    }

    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self {
            generation: Generation::Failed {
                diagnostic: diagnostic.into(),
            },
            evaluations: Vec::new(),
        }
    }

    /// Generated text, or the failure sentinel.
    pub fn output(&self) -> &str {
        match &self.generation {
            Generation::Generated { output } => output,
            Generation::Failed { .. } => FAILED_OUTPUT,
        }
    }

    pub fn diagnostic(&self) -> String {
        match &self.generation {
            Generation::Generated { .. } => "Success".to_string(),
            Generation::Failed { diagnostic } => format!("Error: {}", diagnostic),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.generation, Generation::Failed { .. })
    }
}

impl Serialize for CellResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CellResult", 2)?;
        state.serialize_field("output", self.output())?;
        state.serialize_field("evaluations", &self.evaluations)?;
        state.end()
    }
}
