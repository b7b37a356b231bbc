use std::collections::HashMap;

use quiz_crawler::resolve;
use scraper::{ElementRef, Html};

use crate::model::{kind, AnswerOption, Question, Test};
use crate::quiz_options::{self, QuizOptions};
use crate::selectors::Selectors;

/// Extracts one test from its page.
///
/// Never fails: a page whose markup does not match the selectors gives a test
/// without questions, and missing pieces of a question are left empty.
pub fn parse_test(url: &str, html: &str, selectors: &Selectors) -> Test {
    let document = Html::parse_document(html);

    let title = document
        .select(&selectors.title)
        .next()
        .map(element_text)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| url.to_string());

    let answers = quiz_options::extract(html);

    let questions = document
        .select(&selectors.question)
        .map(|step| parse_question(step, url, &answers, selectors))
        .collect::<Vec<_>>();

    if questions.is_empty() {
        log::warn!("No question found on {url}, the quiz may need scripts to render");
    }

    Test {
        url: url.to_string(),
        title,
        questions,
    }
}

fn parse_question(
    step: ElementRef,
    url: &str,
    answers: &HashMap<String, QuizOptions>,
    selectors: &Selectors,
) -> Question {
    let answer = step
        .value()
        .attr(&selectors.question_id_attr)
        .and_then(|id| answers.get(id));

    let kind = answer
        .and_then(|a| a.question_type.as_deref())
        .filter(|kind| !kind.is_empty())
        .or_else(|| step.value().attr(&selectors.question_type_attr))
        .filter(|kind| !kind.is_empty())
        .unwrap_or(kind::RADIO)
        .to_string();

    let prompt = step.select(&selectors.question_text).next();
    let text = prompt.map(element_text).unwrap_or_default();
    let images = prompt
        .map(|p| images(p, url, selectors))
        .unwrap_or_default();

    let options = match kind.as_str() {
        kind::RADIO | kind::CHECKBOX => choice_options(step, url, answer, selectors),
        kind::SHORT_TEXT => answer
            .and_then(QuizOptions::short_answer)
            .map(|text| {
                vec![AnswerOption {
                    text,
                    correct: true,
                    images: vec![],
                }]
            })
            .unwrap_or_default(),
        kind::MATCHING => matching_options(step, url, answer, selectors),
        other => {
            log::debug!("Unsupported question kind {other} on {url}");
            vec![]
        }
    };

    Question {
        text,
        kind,
        options,
        images,
    }
}

fn choice_options(
    step: ElementRef,
    url: &str,
    answer: Option<&QuizOptions>,
    selectors: &Selectors,
) -> Vec<AnswerOption> {
    step.select(&selectors.option)
        .filter_map(|field| {
            let input = match &selectors.option_input {
                Some(input) => Some(field.select(input).next()?),
                None => None,
            };

            let label = input
                .and_then(|input| input.value().id())
                .and_then(|id| {
                    field
                        .select(&selectors.label)
                        .find(|label| label.value().attr("for") == Some(id))
                });
            let source = label.unwrap_or(field);

            let answer_id = input
                .and_then(|input| input.value().attr("value"))
                .unwrap_or_default();
            let marked = selectors
                .correct_option
                .as_ref()
                .is_some_and(|marker| marker.matches(&field) || field.select(marker).next().is_some());
            let correct = marked || answer.is_some_and(|a| a.is_correct(answer_id));

            Some(AnswerOption {
                text: element_text(source),
                correct,
                images: images(source, url, selectors),
            })
        })
        .collect()
}

fn matching_options(
    step: ElementRef,
    url: &str,
    answer: Option<&QuizOptions>,
    selectors: &Selectors,
) -> Vec<AnswerOption> {
    let positions = answer
        .map(QuizOptions::matching_positions)
        .unwrap_or_default();

    step.select(&selectors.matching_option)
        .filter_map(|opt| {
            let choice = opt.select(&selectors.matching_choice).next()?;
            let matched = opt.select(&selectors.matching_match).next()?;

            let choice_text = element_text(choice);
            let text = match matched
                .value()
                .attr(&selectors.matching_answer_attr)
                .and_then(|id| positions.get(id))
            {
                Some(pos) => format!("{choice_text} -> {pos}"),
                None => choice_text,
            };

            Some(AnswerOption {
                text,
                correct: true,
                images: images(choice, url, selectors),
            })
        })
        .collect()
}

fn images(element: ElementRef, url: &str, selectors: &Selectors) -> Vec<String> {
    element
        .select(&selectors.image)
        .filter_map(|img| img.value().attr("src"))
        .map(|src| resolve(url, src.trim()))
        .collect()
}

/// Text content with whitespace runs collapsed to single spaces.
pub(crate) fn element_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
