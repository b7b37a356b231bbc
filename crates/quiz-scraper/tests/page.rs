use quiz_scraper::page::parse_test;
use quiz_scraper::{SelectorConfig, Selectors};

const QUIZ: &str = include_str!("fixtures/quiz.html");
const MARKED: &str = include_str!("fixtures/marked.html");
const UNRENDERED: &str = include_str!("fixtures/unrendered.html");

const URL: &str = "https://info-master.uz/test/1/";

fn selectors() -> Selectors {
    Selectors::try_from(&SelectorConfig::default()).unwrap()
}

#[test]
fn quiz_maker_page() {
    let test = parse_test(URL, QUIZ, &selectors());

    assert_eq!(test.url, URL);
    assert_eq!(test.title, "Informatika test 1");
    assert_eq!(test.questions.len(), 5);

    let counts = test
        .questions
        .iter()
        .map(|q| q.options.len())
        .collect::<Vec<_>>();
    assert_eq!(counts, vec![2, 3, 1, 3, 1]);
}

#[test]
fn choice_questions_take_answers_from_quiz_options() {
    let test = parse_test(URL, QUIZ, &selectors());

    let radio = &test.questions[0];
    assert_eq!(radio.text, "2+2=?");
    assert_eq!(radio.kind, "radio");
    assert_eq!(radio.variants(), vec!["3", "4"]);
    assert_eq!(radio.correct_answer(), vec![1]);

    let checkbox = &test.questions[1];
    assert_eq!(checkbox.text, "Which are input devices?");
    assert_eq!(checkbox.kind, "checkbox");
    assert_eq!(checkbox.variants(), vec!["Keyboard", "Printer", "Mouse"]);
    assert_eq!(checkbox.correct_answer(), vec![0, 2]);
    assert_eq!(
        checkbox.images,
        vec!["https://info-master.uz/wp-content/uploads/devices.png"]
    );
    assert!(checkbox.options[0].images.is_empty());
    assert_eq!(
        checkbox.options[2].images,
        vec!["https://info-master.uz/test/1/mouse.png"]
    );
}

#[test]
fn short_text_and_matching_questions() {
    let test = parse_test(URL, QUIZ, &selectors());

    let short = &test.questions[2];
    assert_eq!(short.kind, "short_text");
    assert_eq!(short.variants(), vec!["CPU"]);
    assert_eq!(short.correct_answer(), vec![0]);

    let matching = &test.questions[3];
    assert_eq!(matching.kind, "matching");
    assert_eq!(matching.variants(), vec!["RAM -> 2", "ROM -> 1", "Cache"]);
    assert_eq!(matching.correct_answer(), vec![0, 1, 2]);
}

#[test]
fn question_without_quiz_options_has_no_correct_answer() {
    let test = parse_test(URL, QUIZ, &selectors());

    let unknown = &test.questions[4];
    assert_eq!(unknown.kind, "checkbox");
    assert_eq!(unknown.variants(), vec!["Yes"]);
    assert!(unknown.correct_answer().is_empty());
}

#[test]
fn correctness_from_marker_selector() {
    let config = SelectorConfig {
        question: String::from(".question"),
        question_text: String::from(".prompt"),
        option: String::from("li.option"),
        option_input: None,
        correct_option: Some(String::from(".correct")),
        ..Default::default()
    };
    let selectors = Selectors::try_from(&config).unwrap();

    let test = parse_test("https://quiz.test/test/arith", MARKED, &selectors);

    assert_eq!(test.title, "Arithmetic");
    assert_eq!(test.questions.len(), 1);
    let question = &test.questions[0];
    assert_eq!(question.text, "2+2=?");
    assert_eq!(question.options.len(), 2);
    assert_eq!(question.options[0].text, "3");
    assert!(!question.options[0].correct);
    assert_eq!(question.options[1].text, "4");
    assert!(question.options[1].correct);
}

#[test]
fn several_marked_options_are_all_recorded() {
    let config = SelectorConfig {
        question: String::from(".q"),
        question_text: String::from("p"),
        option: String::from(".o"),
        option_input: None,
        correct_option: Some(String::from("b.ok")),
        ..Default::default()
    };
    let selectors = Selectors::try_from(&config).unwrap();
    let html = r#"<div class="q"><p>Pick</p>
        <span class="o">a <b class="ok">*</b></span>
        <span class="o">b</span>
        <span class="o">c <b class="ok">*</b></span></div>"#;

    let test = parse_test("https://quiz.test/t", html, &selectors);

    assert_eq!(test.questions[0].correct_answer(), vec![0, 2]);
}

#[test]
fn unrendered_page_gives_empty_test() {
    let test = parse_test("https://info-master.uz/test/2/", UNRENDERED, &selectors());

    assert_eq!(test.title, "Test 2");
    assert!(test.questions.is_empty());
}

#[test]
fn missing_title_falls_back_to_url() {
    let test = parse_test("https://quiz.test/x", "<p>nothing</p>", &selectors());

    assert_eq!(test.title, "https://quiz.test/x");
    assert!(test.questions.is_empty());
}

#[test]
fn empty_decoded_kind_falls_back_to_block_attribute() {
    // {"question_type":"","question_answer":{"11":"1","12":"0"}}
    let html = r#"<script>
        window.quizOptions_7['201'] = 'eyJxdWVzdGlvbl90eXBlIjoiIiwicXVlc3Rpb25fYW5zd2VyIjp7IjExIjoiMSIsIjEyIjoiMCJ9fQ==';
    </script>
    <div class="step" data-question-id="201" data-type="checkbox">
      <div class="ays_quiz_question">Pick</div>
      <div class="ays-quiz-answers">
        <div class="ays-field"><input id="ays-answer-11-7" value="11"><label for="ays-answer-11-7">a</label></div>
        <div class="ays-field"><input id="ays-answer-12-7" value="12"><label for="ays-answer-12-7">b</label></div>
      </div>
    </div>"#;

    let test = parse_test("https://quiz.test/t", html, &selectors());

    let question = &test.questions[0];
    assert_eq!(question.kind, "checkbox");
    assert_eq!(question.correct_answer(), vec![0]);
}
