use quiz_scraper::listing::{collect_links, next_page};
use quiz_scraper::{SelectorConfig, Selectors};

const LISTING: &str = include_str!("fixtures/listing.html");
const LISTING_LAST: &str = include_str!("fixtures/listing_last.html");

fn selectors() -> Selectors {
    Selectors::try_from(&SelectorConfig::default()).unwrap()
}

#[test]
fn links_are_deduplicated_in_first_seen_order() {
    let links = collect_links(LISTING, &selectors());
    assert_eq!(links, vec!["/test/1", "/test/2"]);
}

#[test]
fn links_use_configured_selector() {
    let html = r#"
        <a class="quiz" href="/test/1">1</a>
        <a class="quiz" href="/test/2">2</a>
        <a class="quiz" href="/test/1">1</a>
        <a class="quiz" href="  ">blank</a>
        <a class="quiz">no href</a>
        <a href="/test/3">other</a>
    "#;
    let config = SelectorConfig {
        listing_link: String::from("a.quiz"),
        ..Default::default()
    };
    let selectors = Selectors::try_from(&config).unwrap();

    assert_eq!(collect_links(html, &selectors), vec!["/test/1", "/test/2"]);
}

#[test]
fn next_page_link_matched_by_text() {
    assert_eq!(
        next_page(LISTING, &selectors()).as_deref(),
        Some("/category/informatika-2/page/2/")
    );
    assert_eq!(next_page(LISTING_LAST, &selectors()), None);
}

#[test]
fn next_page_without_text_takes_first_match() {
    let config = SelectorConfig {
        next_page: String::from("a.next"),
        next_page_text: None,
        ..Default::default()
    };
    let selectors = Selectors::try_from(&config).unwrap();
    let html = r#"<a href="/p/1">1</a><a class="next" href="/p/2">&gt;</a>"#;

    assert_eq!(next_page(html, &selectors).as_deref(), Some("/p/2"));
}
