use std::collections::HashSet;

use scraper::Html;

use crate::page::element_text;
use crate::selectors::Selectors;

/// Hrefs of the test links of a listing page, first-seen order, no duplicates.
pub fn collect_links(html: &str, selectors: &Selectors) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();

    document
        .select(&selectors.listing_link)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .filter(|href| seen.insert(href.to_string()))
        .map(str::to_string)
        .collect()
}

/// Href of the link to the next listing page, if the page has one.
pub fn next_page(html: &str, selectors: &Selectors) -> Option<String> {
    let document = Html::parse_document(html);

    document
        .select(&selectors.next_page)
        .filter(|a| match &selectors.next_page_text {
            Some(text) => element_text(*a).contains(text.as_str()),
            None => true,
        })
        .find_map(|a| {
            a.value()
                .attr("href")
                .map(str::trim)
                .filter(|href| !href.is_empty())
                .map(str::to_string)
        })
}
