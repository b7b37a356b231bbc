use std::collections::HashMap;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::config::CrawlerConfig;

/// Turns a page url into its html.
///
/// The crawler only knows about this capability, so a static download can be
/// swapped for a rendering browser without touching any scraping code.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch(&mut self, url: &str) -> Result<String>;

    async fn close(self) -> Result<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Downloads pages as served, scripts are not executed.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let mut builder = reqwest::ClientBuilder::new()
            .gzip(true)
            .deflate(true)
            .user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&mut self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Couldn't download {url}"))?
            .error_for_status()
            .with_context(|| format!("Bad response for {url}"))?;
        let page = resp
            .text()
            .await
            .with_context(|| format!("Couldn't read body of {url}"))?;
        Ok(page)
    }
}

/// Serves pages from memory, records every requested url.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, String>,
    requests: Vec<String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, page: impl Into<String>) -> Self {
        self.insert(url, page);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, page: impl Into<String>) {
        self.pages.insert(url.into(), page.into());
    }

    pub fn requests(&self) -> &[String] {
        &self.requests
    }
}

impl Fetcher for MemoryFetcher {
    async fn fetch(&mut self, url: &str) -> Result<String> {
        self.requests.push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("Couldn't download {url} got: no such page"))
    }
}
