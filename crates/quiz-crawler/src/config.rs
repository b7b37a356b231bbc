use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in seconds, `None` keeps the client default
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: Option<u64>,

    /// Maximum number of listing pages to follow, `None` means until exhausted
    #[serde(default)]
    pub max_listing_pages: Option<usize>,

    /// Keep only the first `max_pages` collected page urls
    #[serde(default)]
    pub max_pages: Option<usize>,

    #[serde(default = "default_fetch_mode")]
    pub fetch_mode: FetchMode,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default = "default_on_dl_error")]
    pub on_dl_error: OnError,

    #[serde(default = "default_on_scrap_error")]
    pub on_scrap_error: OnError,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_listing_pages: None,
            max_pages: None,
            fetch_mode: default_fetch_mode(),
            browser: BrowserConfig::default(),
            on_dl_error: default_on_dl_error(),
            on_scrap_error: default_on_scrap_error(),
        }
    }
}

fn default_user_agent() -> String {
    String::from("QuizCrawlBot")
}

fn default_timeout_secs() -> Option<u64> {
    Some(20)
}

fn default_fetch_mode() -> FetchMode {
    FetchMode::Static
}

fn default_on_dl_error() -> OnError {
    OnError::Fail
}

fn default_on_scrap_error() -> OnError {
    OnError::Fail
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OnError {
    Fail,
    SkipAndLog,
}

/// How pages are turned into html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum FetchMode {
    /// Plain HTTP GET, the html as served
    Static,
    /// Headless browser, the html after page scripts ran
    Browser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserConfig {
    /// Chromium executable, detected when missing
    #[serde(default)]
    pub executable: Option<PathBuf>,

    /// CSS selector that signals the page content is rendered
    #[serde(default)]
    pub wait_for: Option<String>,

    #[serde(default = "default_wait_secs")]
    pub wait_secs: u64,

    #[serde(default = "default_browser_args")]
    pub args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            executable: None,
            wait_for: None,
            wait_secs: default_wait_secs(),
            args: default_browser_args(),
        }
    }
}

fn default_wait_secs() -> u64 {
    20
}

fn default_browser_args() -> Vec<String> {
    vec![
        String::from("--no-sandbox"),
        String::from("--disable-dev-shm-usage"),
        String::from("--disable-gpu"),
    ]
}
