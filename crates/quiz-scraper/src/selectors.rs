//! Where things live in the site's markup.
//!
//! Every selector is plain data so that a change of the site layout only
//! needs a new YAML file, the defaults match the Quiz Maker plugin markup.

use anyhow::{anyhow, Result};
use scraper::Selector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorConfig {
    /// Test page links on a listing page
    #[serde(default = "default_listing_link")]
    pub listing_link: String,

    /// Candidate links to the next listing page
    #[serde(default = "default_next_page")]
    pub next_page: String,

    /// Text a candidate next link must contain, any candidate matches when unset
    #[serde(default = "default_next_page_text")]
    pub next_page_text: Option<String>,

    #[serde(default = "default_title")]
    pub title: String,

    /// One element per question
    #[serde(default = "default_question")]
    pub question: String,

    #[serde(default = "default_question_id_attr")]
    pub question_id_attr: String,

    #[serde(default = "default_question_type_attr")]
    pub question_type_attr: String,

    /// Question prompt, within a question
    #[serde(default = "default_question_text")]
    pub question_text: String,

    /// One element per answer option, within a question
    #[serde(default = "default_option")]
    pub option: String,

    /// Input of an option, fields without one are ignored when set
    #[serde(default = "default_option_input")]
    pub option_input: Option<String>,

    /// Marks an option as correct when the option matches or contains it
    #[serde(default)]
    pub correct_option: Option<String>,

    #[serde(default = "default_matching_option")]
    pub matching_option: String,

    #[serde(default = "default_matching_choice")]
    pub matching_choice: String,

    #[serde(default = "default_matching_match")]
    pub matching_match: String,

    #[serde(default = "default_matching_answer_attr")]
    pub matching_answer_attr: String,

    /// Present once the quiz is rendered, used when pages come from a browser
    #[serde(default = "default_ready")]
    pub ready: Option<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            listing_link: default_listing_link(),
            next_page: default_next_page(),
            next_page_text: default_next_page_text(),
            title: default_title(),
            question: default_question(),
            question_id_attr: default_question_id_attr(),
            question_type_attr: default_question_type_attr(),
            question_text: default_question_text(),
            option: default_option(),
            option_input: default_option_input(),
            correct_option: None,
            matching_option: default_matching_option(),
            matching_choice: default_matching_choice(),
            matching_match: default_matching_match(),
            matching_answer_attr: default_matching_answer_attr(),
            ready: default_ready(),
        }
    }
}

fn default_listing_link() -> String {
    String::from("h2.font130.mt0.mb10.mobfont120.lineheight25 a")
}

fn default_next_page() -> String {
    String::from("a")
}

fn default_next_page_text() -> Option<String> {
    Some(String::from("Keyingi sahifa"))
}

fn default_title() -> String {
    String::from("h1")
}

fn default_question() -> String {
    String::from("div.step[data-question-id]")
}

fn default_question_id_attr() -> String {
    String::from("data-question-id")
}

fn default_question_type_attr() -> String {
    String::from("data-type")
}

fn default_question_text() -> String {
    String::from(".ays_quiz_question")
}

fn default_option() -> String {
    String::from(".ays-quiz-answers .ays-field")
}

fn default_option_input() -> Option<String> {
    Some(String::from("input[id^='ays-answer-']"))
}

fn default_matching_option() -> String {
    String::from(".ays-matching-field .ays-matching-field-option")
}

fn default_matching_choice() -> String {
    String::from(".ays-matching-field-choice")
}

fn default_matching_match() -> String {
    String::from(".ays-matching-field-match")
}

fn default_matching_answer_attr() -> String {
    String::from("data-answer-id")
}

fn default_ready() -> Option<String> {
    Some(String::from(".ays-quiz-container"))
}

/// Parsed form of a [`SelectorConfig`].
#[derive(Debug, Clone)]
pub struct Selectors {
    pub listing_link: Selector,
    pub next_page: Selector,
    pub next_page_text: Option<String>,
    pub title: Selector,
    pub question: Selector,
    pub question_id_attr: String,
    pub question_type_attr: String,
    pub question_text: Selector,
    pub option: Selector,
    pub option_input: Option<Selector>,
    pub correct_option: Option<Selector>,
    pub matching_option: Selector,
    pub matching_choice: Selector,
    pub matching_match: Selector,
    pub matching_answer_attr: String,
    pub label: Selector,
    pub image: Selector,
}

fn parse(field: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow!("Invalid {field} selector `{selector}` got: {e:?}"))
}

fn parse_opt(field: &str, selector: &Option<String>) -> Result<Option<Selector>> {
    selector.as_deref().map(|s| parse(field, s)).transpose()
}

impl TryFrom<&SelectorConfig> for Selectors {
    type Error = anyhow::Error;

    fn try_from(c: &SelectorConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            listing_link: parse("listingLink", &c.listing_link)?,
            next_page: parse("nextPage", &c.next_page)?,
            next_page_text: c.next_page_text.clone(),
            title: parse("title", &c.title)?,
            question: parse("question", &c.question)?,
            question_id_attr: c.question_id_attr.clone(),
            question_type_attr: c.question_type_attr.clone(),
            question_text: parse("questionText", &c.question_text)?,
            option: parse("option", &c.option)?,
            option_input: parse_opt("optionInput", &c.option_input)?,
            correct_option: parse_opt("correctOption", &c.correct_option)?,
            matching_option: parse("matchingOption", &c.matching_option)?,
            matching_choice: parse("matchingChoice", &c.matching_choice)?,
            matching_match: parse("matchingMatch", &c.matching_match)?,
            matching_answer_attr: c.matching_answer_attr.clone(),
            label: parse("label", "label[for]")?,
            image: parse("image", "img[src]")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_compile() {
        let selectors = Selectors::try_from(&SelectorConfig::default()).unwrap();
        assert_eq!(selectors.question_id_attr, "data-question-id");
        assert!(selectors.correct_option.is_none());
    }

    #[test]
    fn invalid_selector_is_reported() {
        let config = SelectorConfig {
            question: String::from("div[[["),
            ..Default::default()
        };
        let err = Selectors::try_from(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid question selector"));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: SelectorConfig =
            serde_yaml::from_str("title: h2.entry-title\ncorrectOption: .correct\n").unwrap();
        assert_eq!(config.title, "h2.entry-title");
        assert_eq!(config.correct_option.as_deref(), Some(".correct"));
        assert_eq!(config.question, default_question());
    }
}
