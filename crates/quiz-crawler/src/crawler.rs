use std::collections::HashSet;

use anyhow::Result;
use url::Url;

use crate::config::{CrawlerConfig, OnError};
use crate::fetcher::Fetcher;
use crate::scrapable::{PageLocation, Scrapable, Seed};

/// Collects page urls from a listing, following its next links.
///
/// Links are resolved against the listing page they were found on and kept
/// in first-seen order without duplicates. Following stops when there is no
/// next link, when a listing page comes back a second time, or when
/// `max_listing_pages` pages were read.
pub async fn gather_urls<T, F>(
    config: &CrawlerConfig,
    scraper: &T,
    fetcher: &mut F,
    listing_url: &str,
) -> Result<Vec<String>>
where
    T: Scrapable,
    F: Fetcher,
{
    let mut urls = vec![];
    let mut seen = HashSet::new();
    let mut visited = HashSet::new();
    let mut next = Some(listing_url.to_string());

    while let Some(listing) = next.take() {
        if config
            .max_listing_pages
            .is_some_and(|max| visited.len() >= max)
        {
            log::info!("Reached {} listing pages, stopping", visited.len());
            break;
        }
        if !visited.insert(listing.clone()) {
            log::warn!("Listing page {listing} already visited, stopping");
            break;
        }

        log::info!("Collecting links from {listing}");
        let page = match fetcher.fetch(&listing).await {
            Ok(page) => page,
            Err(e) => match config.on_dl_error {
                OnError::SkipAndLog => {
                    log::warn!("Skipping listing {listing} got: {e:#}");
                    break;
                }
                OnError::Fail => return Err(e),
            },
        };

        let location = PageLocation::Url(listing.clone());
        for link in scraper.links(&page, &location) {
            let url = resolve(&listing, &link);
            if seen.insert(url.clone()) {
                urls.push(url);
            }
        }
        next = scraper
            .next_listing(&page, &location)
            .map(|link| resolve(&listing, &link));
    }

    Ok(urls)
}

/// Resolves `href` against `base`, returns it untouched when either is not a url.
pub fn resolve(base: &str, href: &str) -> String {
    match Url::parse(base).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    }
}

fn dedup(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Runs a full crawl: seed urls first, then every page in order, one at a time.
pub async fn crawl_site<T, F>(
    crawler_conf: &CrawlerConfig,
    scraper_conf: &T::Config,
    fetcher: &mut F,
) -> Result<Vec<T::Item>>
where
    T: Scrapable,
    F: Fetcher,
{
    let mut scraper = <T as Scrapable>::new(scraper_conf)?;

    let mut urls = match scraper.seed() {
        Seed::Listing(url) => gather_urls(crawler_conf, &scraper, fetcher, &url).await?,
        Seed::Pages(urls) => dedup(urls),
    };
    if let Some(max) = crawler_conf.max_pages {
        urls.truncate(max);
    }
    log::info!("Found {} pages", urls.len());

    let total = urls.len();
    let mut items = Vec::with_capacity(total);
    for (i, url) in urls.into_iter().enumerate() {
        log::info!("Scraping page {}/{total}: {url}", i + 1);

        let page = match fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(e) => match crawler_conf.on_dl_error {
                OnError::SkipAndLog => {
                    log::warn!("Skipping URL: {e:#}");
                    continue;
                }
                OnError::Fail => return Err(e),
            },
        };

        let location = PageLocation::Url(url);
        match scraper.scrap(page, &location) {
            Ok(item) => items.push(item),
            Err(e) => match crawler_conf.on_scrap_error {
                OnError::SkipAndLog => {
                    log::error!("Skipping scrap for page {location} got: {e:#}");
                }
                OnError::Fail => {
                    return Err(e.context(format!("Couldn't scrap {location}")));
                }
            },
        }
    }

    Ok(items)
}
