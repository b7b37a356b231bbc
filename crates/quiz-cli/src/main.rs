use std::io;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use quiz_crawler::{
    crawl_site, CrawlerConfig, FetchMode, Fetcher, HttpFetcher, OnError, PageLocation,
};
#[cfg(feature = "browser")]
use quiz_crawler::BrowserFetcher;
use quiz_scraper::writer::{JsonWriter, DEFAULT_OUTPUT_FILE};
use quiz_scraper::{scrap_page, QuizScraper, QuizScraperConfig, Test};
use tokio::runtime;

const CRAWL_LOG_FILTER: &str = "quiz_crawler=info,quiz_scraper=info,quizcrawl=info";
const SCRAP_LOG_FILTER: &str = "quiz_crawler=warn,quiz_scraper=warn";

/// Quiz pages crawler, without arguments crawls the default site into tests.json
#[derive(Debug, Parser)]
#[command(version, args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Option<SubCommand>,

    #[command(flatten)]
    pub crawl: CrawlArgs,
}

#[derive(Debug, clap::Subcommand)]
pub enum SubCommand {
    #[command(name = "scrap")]
    Scrap(ScrapArgs),
    #[command(hide = true)]
    Completion,
}

#[derive(Debug, clap::Args)]
pub struct CrawlArgs {
    /// Path to the output file that will contain scrapped tests
    #[arg(long, short, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,
    /// Optional crawler yaml configuration file
    #[arg(env = "QUIZ_CRAWLER_CONFIG", long)]
    pub crawler_config: Option<PathBuf>,
    /// Optional scraper yaml configuration file (listing url, selectors)
    #[arg(env = "QUIZ_SCRAPER_CONFIG", long)]
    pub scraper_config: Option<PathBuf>,
    /// Override the listing page url
    #[arg(long)]
    pub listing_url: Option<String>,
    /// Scrap this test page instead of reading the listing, can be repeated
    #[arg(long = "page")]
    pub pages: Vec<String>,
    /// Override crawler's user agent
    #[arg(long)]
    pub user_agent: Option<String>,
    /// Override crawler's request timeout, in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Override crawler's maximum number of listing pages to follow
    #[arg(long)]
    pub max_listing_pages: Option<usize>,
    /// Only scrap the first tests found
    #[arg(long)]
    pub max_tests: Option<usize>,
    /// Override crawler's download error handling strategy
    #[arg(value_enum, long)]
    pub on_dl_error: Option<OnError>,
    /// Override crawler's scrap error handling strategy
    #[arg(value_enum, long)]
    pub on_scrap_error: Option<OnError>,
    /// Render pages in a headless browser before scraping
    #[arg(long)]
    pub browser: bool,
    /// When quiet no logs are outputted
    #[arg(long, short)]
    pub quiet: bool,
}

impl TryFrom<&CrawlArgs> for CrawlerConfig {
    type Error = anyhow::Error;

    fn try_from(args: &CrawlArgs) -> Result<Self, Self::Error> {
        let mut conf = if let Some(file) = args.crawler_config.as_ref().map(fs_err::File::open) {
            serde_yaml::from_reader(file?)?
        } else {
            CrawlerConfig::default()
        };
        if let Some(user_agent) = &args.user_agent {
            conf.user_agent = user_agent.to_string();
        }
        if let Some(timeout) = args.timeout {
            conf.timeout_secs = Some(timeout);
        }
        if let Some(max_listing_pages) = args.max_listing_pages {
            conf.max_listing_pages = Some(max_listing_pages);
        }
        if let Some(max_tests) = args.max_tests {
            conf.max_pages = Some(max_tests);
        }
        if let Some(on_dl_error) = args.on_dl_error {
            conf.on_dl_error = on_dl_error;
        }
        if let Some(on_scrap_error) = args.on_scrap_error {
            conf.on_scrap_error = on_scrap_error;
        }
        if args.browser {
            conf.fetch_mode = FetchMode::Browser;
        }
        Ok(conf)
    }
}

impl TryFrom<&CrawlArgs> for QuizScraperConfig {
    type Error = anyhow::Error;

    fn try_from(args: &CrawlArgs) -> Result<Self, Self::Error> {
        let mut conf = match &args.scraper_config {
            Some(path) => QuizScraperConfig::from_yaml_file(path)?,
            None => QuizScraperConfig::default(),
        };
        if let Some(listing_url) = &args.listing_url {
            conf.listing_url = listing_url.to_string();
        }
        if !args.pages.is_empty() {
            conf.pages = args.pages.clone();
        }
        Ok(conf)
    }
}

pub fn crawl(args: CrawlArgs) -> Result<()> {
    let mut crawler_conf = CrawlerConfig::try_from(&args)?;
    let scraper_conf = QuizScraperConfig::try_from(&args)?;
    if crawler_conf.browser.wait_for.is_none() {
        crawler_conf.browser.wait_for = scraper_conf.selectors.ready.clone();
    }

    let rt = runtime::Builder::new_multi_thread().enable_all().build()?;
    let tests = rt.block_on(crawl_tests(&crawler_conf, &scraper_conf))?;

    JsonWriter::File(args.output_file.clone()).write(&tests)?;
    log::info!(
        "Saved {} parsed tests to {}",
        tests.len(),
        args.output_file.display()
    );
    Ok(())
}

async fn crawl_tests(
    crawler_conf: &CrawlerConfig,
    scraper_conf: &QuizScraperConfig,
) -> Result<Vec<Test>> {
    match crawler_conf.fetch_mode {
        FetchMode::Static => {
            let mut fetcher = HttpFetcher::new(crawler_conf)?;
            crawl_site::<QuizScraper, _>(crawler_conf, scraper_conf, &mut fetcher).await
        }
        #[cfg(feature = "browser")]
        FetchMode::Browser => {
            let mut fetcher = BrowserFetcher::launch(&crawler_conf.browser).await?;
            let res = crawl_site::<QuizScraper, _>(crawler_conf, scraper_conf, &mut fetcher).await;
            let closed = fetcher.close().await;
            let tests = res?;
            closed?;
            Ok(tests)
        }
        #[cfg(not(feature = "browser"))]
        FetchMode::Browser => bail!("Browser fetching requires building with the `browser` feature"),
    }
}

/// Scrap a single page and print the resulting test to stdout
#[derive(Debug, clap::Args)]
#[command(group = clap::ArgGroup::new("page").required(true))]
pub struct ScrapArgs {
    /// A local html page to scrap
    #[arg(group = "page", long)]
    pub file: Option<PathBuf>,
    /// A distant html page to scrap
    #[arg(group = "page", long)]
    pub url: Option<String>,
    /// Optional scraper yaml configuration file
    #[arg(env = "QUIZ_SCRAPER_CONFIG", long)]
    pub scraper_config: Option<PathBuf>,
    /// Custom user agent to download the page
    #[arg(long, conflicts_with = "file")]
    pub ua: Option<String>,
}

pub fn scrap(args: ScrapArgs) -> Result<()> {
    let config = match &args.scraper_config {
        Some(path) => QuizScraperConfig::from_yaml_file(path)?,
        None => QuizScraperConfig::default(),
    };

    let (page, location) = if let Some(url) = args.url {
        let mut crawler_conf = CrawlerConfig::default();
        if let Some(ua) = args.ua {
            crawler_conf.user_agent = ua;
        }
        let rt = runtime::Builder::new_current_thread().enable_all().build()?;
        let page = rt.block_on(async { HttpFetcher::new(&crawler_conf)?.fetch(&url).await })?;
        (page, PageLocation::Url(url))
    } else if let Some(path) = args.file {
        let page = fs_err::read_to_string(&path)?;
        (page, PageLocation::Path(path))
    } else {
        bail!("Missing `url` or `file`");
    };

    let test = scrap_page(&config, page, location)?;
    JsonWriter::Stdout.write(&test)
}

fn init_logger(filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.cmd {
        None => {
            if !args.crawl.quiet {
                init_logger(CRAWL_LOG_FILTER);
            }
            crawl(args.crawl)
        }
        Some(SubCommand::Scrap(args)) => {
            init_logger(SCRAP_LOG_FILTER);
            scrap(args)
        }
        Some(SubCommand::Completion) => {
            generate(Shell::Bash, &mut Args::command(), "quizcrawl", &mut io::stdout());
            Ok(())
        }
    }
}
