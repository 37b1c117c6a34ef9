use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::model::judgment::{Judgment, Score};

#[derive(Debug, Error)]
pub enum JudgmentParseError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// What evaluator models are asked to reply with. Field names vary between
/// models, hence the aliases.
#[derive(Deserialize)]
struct JudgmentReply {
    #[serde(
        default,
        rename = "evalName",
        alias = "Evalname",
        alias = "evalname",
        alias = "eval_name",
        alias = "name"
    )]
    eval_name: Option<String>,

    #[serde(deserialize_with = "lenient_score")]
    score: Option<f64>,

    #[serde(alias = "rationale", alias = "reason")]
    why: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScoreRepr {
    Number(f64),
    Text(String),
}

fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<ScoreRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(ScoreRepr::Number(n)) => Ok(Some(n)),
        Some(ScoreRepr::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("score {:?} is not a number", s))),
    }
}

/// Turn an evaluator's free-text reply into a judgment. Never fails: bad
/// input yields a judgment with a failed score and the reason in `why`.
pub fn parse_judgment(raw: &str, evaluator_name: &str) -> Judgment {
    match decode(raw, evaluator_name) {
        Ok(judgment) => judgment,
        Err(err) => {
            tracing::warn!(evaluator = evaluator_name, "unparseable judgment: {}", err);
            Judgment::failed(evaluator_name, err)
        }
    }
}

fn decode(raw: &str, evaluator_name: &str) -> Result<Judgment, JudgmentParseError> {
    let reply: JudgmentReply = serde_json::from_str(strip_code_fence(raw))?;

    Ok(Judgment {
        eval_name: reply
            .eval_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| evaluator_name.to_string()),
        score: Score::from(reply.score),
        why: reply.why,
    })
}

/// Removes one surrounding ``` fence (with optional language tag).
fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();

    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    let rest = rest.strip_suffix("```").unwrap_or(rest);

    rest.trim()
}
