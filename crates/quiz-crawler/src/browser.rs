use std::time::Duration;

use anyhow::{anyhow, Result};
use chromiumoxide::Browser;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

use crate::config::BrowserConfig;
use crate::fetcher::Fetcher;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Renders pages in headless Chromium and returns the resulting html.
pub struct BrowserFetcher {
    browser: Browser,
    handler: JoinHandle<()>,
    wait_for: Option<String>,
    wait: Duration,
}

impl BrowserFetcher {
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let mut builder = chromiumoxide::BrowserConfig::builder()
            .new_headless_mode()
            .args(config.args.clone());
        if let Some(exe) = &config.executable {
            builder = builder.chrome_executable(exe);
        }
        let cdp_config = builder
            .build()
            .map_err(|e| anyhow!("Invalid browser config got: {e}"))?;

        let (browser, mut handler) = Browser::launch(cdp_config)
            .await
            .map_err(|e| anyhow!("Couldn't launch browser got: {e}"))?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });
        log::debug!("Headless browser launched");

        Ok(Self {
            browser,
            handler,
            wait_for: config.wait_for.clone(),
            wait: Duration::from_secs(config.wait_secs),
        })
    }
}

impl Fetcher for BrowserFetcher {
    async fn fetch(&mut self, url: &str) -> Result<String> {
        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| anyhow!("Couldn't open {url} got: {e}"))?;

        if let Some(selector) = &self.wait_for {
            let deadline = Instant::now() + self.wait;
            while page.find_element(selector.as_str()).await.is_err() {
                if Instant::now() >= deadline {
                    // Whatever is rendered so far still goes to the parser
                    log::warn!("Timed out waiting for {selector} on {url}");
                    break;
                }
                sleep(POLL_INTERVAL).await;
            }
        }

        let html = page.content().await;
        if let Err(e) = page.close().await {
            log::debug!("Couldn't close tab for {url} got: {e}");
        }
        html.map_err(|e| anyhow!("Couldn't read content of {url} got: {e}"))
    }

    async fn close(mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| anyhow!("Couldn't close browser got: {e}"))?;
        self.browser.wait().await?;
        self.handler.await?;
        Ok(())
    }
}
