use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Score of a single judgment. `Failed` is written as `null` in exports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    Value(f64),
    Failed,
}

impl Score {
    pub fn value(&self) -> Option<f64> {
        match self {
            Score::Value(v) => Some(*v),
            Score::Failed => None,
        }
    }
}

impl From<Option<f64>> for Score {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Score::Failed, Score::Value)
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<f64>::deserialize(deserializer).map(Score::from)
    }
}

/// Outcome of running one evaluator against one cell output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    #[serde(rename = "evalName")]
    pub eval_name: String,
    pub score: Score,
    pub why: String,
}

impl Judgment {
    pub fn scored(eval_name: impl Into<String>, score: f64, why: impl Into<String>) -> Self {
        Self {
            eval_name: eval_name.into(),
            score: Score::Value(score),
            why: why.into(),
        }
    }

    /// A judgment that could not be produced. `diagnostic` ends up in `why`.
    pub fn failed(eval_name: impl Into<String>, diagnostic: impl std::fmt::Display) -> Self {
        Self {
            eval_name: eval_name.into(),
            score: Score::Failed,
            why: format!("Error executing evaluator prompt: {}", diagnostic),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.score, Score::Failed)
    }

    /// `name: score` line used in grid cells and detail views.
    pub fn summary(&self) -> String {
        match self.score {
            Score::Value(v) => format!("{}: {}", self.eval_name, v),
            Score::Failed => format!("{}: null", self.eval_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_judgment_serializes_null_score() {
        let judgment = Judgment::failed("tone", "boom");
        let value = serde_json::to_value(&judgment).unwrap();

        assert!(value["score"].is_null());
        assert_eq!(value["evalName"], "tone");
        assert_eq!(value["why"], "Error executing evaluator prompt: boom");
        assert_eq!(judgment.summary(), "tone: null");
    }

    #[test]
    fn scored_judgment_summary() {
        let judgment = Judgment::scored("accuracy", 4.0, "close enough");
        assert!(!judgment.is_failed());
        assert_eq!(judgment.summary(), "accuracy: 4");
    }
}
