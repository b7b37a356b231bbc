use std::path::Path;

use anyhow::Result;
use quiz_crawler::{PageLocation, Scrapable, Seed};
use serde::{Deserialize, Serialize};

use crate::listing::{collect_links, next_page};
use crate::model::Test;
use crate::page::parse_test;
use crate::selectors::{SelectorConfig, Selectors};

pub const DEFAULT_LISTING_URL: &str = "https://info-master.uz/category/informatika-2/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScraperConfig {
    #[serde(default = "default_listing_url")]
    pub listing_url: String,

    /// Test pages to scrap directly, the listing is not read when non empty
    #[serde(default)]
    pub pages: Vec<String>,

    #[serde(default)]
    pub selectors: SelectorConfig,
}

impl Default for QuizScraperConfig {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            pages: vec![],
            selectors: SelectorConfig::default(),
        }
    }
}

impl QuizScraperConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = fs_err::File::open(path.as_ref())?;
        Ok(serde_yaml::from_reader(file)?)
    }
}

fn default_listing_url() -> String {
    String::from(DEFAULT_LISTING_URL)
}

pub struct QuizScraper {
    seed: Seed,
    selectors: Selectors,
}

impl QuizScraper {
    pub fn selectors(&self) -> &Selectors {
        &self.selectors
    }
}

impl Scrapable for QuizScraper {
    type Config = QuizScraperConfig;
    type Item = Test;

    fn new(config: &QuizScraperConfig) -> Result<Self> {
        let selectors = Selectors::try_from(&config.selectors)?;
        let seed = if config.pages.is_empty() {
            Seed::Listing(config.listing_url.clone())
        } else {
            Seed::Pages(config.pages.clone())
        };
        Ok(Self { seed, selectors })
    }

    fn seed(&self) -> Seed {
        self.seed.clone()
    }

    fn links(&self, page: &str, _location: &PageLocation) -> Vec<String> {
        collect_links(page, &self.selectors)
    }

    fn next_listing(&self, page: &str, _location: &PageLocation) -> Option<String> {
        next_page(page, &self.selectors)
    }

    fn scrap(&mut self, page: String, location: &PageLocation) -> Result<Test> {
        let test = parse_test(&location.to_string(), &page, &self.selectors);
        log::info!(
            "Parsed {} questions from {}",
            test.questions.len(),
            location
        );
        Ok(test)
    }
}

/// Scraps a single page outside of any crawl.
pub fn scrap_page(config: &QuizScraperConfig, page: String, location: PageLocation) -> Result<Test> {
    let mut scraper = QuizScraper::new(config)?;
    scraper.scrap(page, &location)
}
