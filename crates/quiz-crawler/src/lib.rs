#[cfg(feature = "browser")]
mod browser;
mod config;
mod crawler;
mod fetcher;
mod scrapable;

#[cfg(feature = "browser")]
pub use browser::BrowserFetcher;
pub use config::{BrowserConfig, CrawlerConfig, FetchMode, OnError};
pub use crawler::{crawl_site, gather_urls, resolve};
pub use fetcher::{Fetcher, HttpFetcher, MemoryFetcher};
pub use scrapable::{PageLocation, Scrapable, Seed};

pub use anyhow;
