use serde::{Deserialize, Serialize};

/// One quiz page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Test {
    pub url: String,
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    pub options: Vec<AnswerOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl Question {
    /// Option texts, in page order
    pub fn variants(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.text.as_str()).collect()
    }

    /// Indices of the options marked correct
    pub fn correct_answer(&self) -> Vec<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.correct)
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    pub correct: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

pub mod kind {
    pub const RADIO: &str = "radio";
    pub const CHECKBOX: &str = "checkbox";
    pub const SHORT_TEXT: &str = "short_text";
    pub const MATCHING: &str = "matching";
}

fn default_kind() -> String {
    String::from(kind::RADIO)
}
