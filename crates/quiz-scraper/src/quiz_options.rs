//! Answer data the quiz plugin embeds in inline scripts.
//!
//! Pages carry statements like
//! `window.quizOptions_1851['52455'] = '<base64 json>';`, one per question,
//! where the json holds the question type and its answers.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

lazy_static! {
    static ref QUIZ_OPTIONS_RE: Regex =
        Regex::new(r"window\.quizOptions_\d+\s*\[\s*'(\d+)'\s*\]\s*=\s*'([^']+)'").unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QuizOptions {
    #[serde(default)]
    pub question_type: Option<String>,

    /// Object `answer id -> "0" | "1"` for choices, `position -> answer id`
    /// for matching, a plain string for short text
    #[serde(default)]
    pub question_answer: Value,
}

impl QuizOptions {
    pub fn is_correct(&self, answer_id: &str) -> bool {
        match self.question_answer.get(answer_id) {
            Some(Value::String(s)) => s == "1" || s.eq_ignore_ascii_case("true"),
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            Some(Value::Bool(b)) => *b,
            _ => false,
        }
    }

    pub fn short_answer(&self) -> Option<String> {
        match &self.question_answer {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Inverted matching answers: `answer id -> position`
    pub fn matching_positions(&self) -> HashMap<String, String> {
        let Some(answers) = self.question_answer.as_object() else {
            return HashMap::new();
        };
        answers
            .iter()
            .filter_map(|(pos, id)| {
                let id = match id {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => return None,
                };
                Some((id, pos.clone()))
            })
            .collect()
    }
}

/// Decodes every quiz options statement of a page, keyed by question id.
///
/// Entries that are not valid base64 json are skipped.
pub fn extract(html: &str) -> HashMap<String, QuizOptions> {
    let mut result = HashMap::new();
    for caps in QUIZ_OPTIONS_RE.captures_iter(html) {
        let (_, [question_id, encoded]) = caps.extract();
        match decode(encoded) {
            Ok(options) => {
                result.insert(question_id.to_string(), options);
            }
            Err(e) => log::debug!("Skipping quiz options of question {question_id} got: {e}"),
        }
    }
    result
}

fn decode(encoded: &str) -> anyhow::Result<QuizOptions> {
    let json = STANDARD.decode(encoded)?;
    Ok(serde_json::from_slice(&json)?)
}
