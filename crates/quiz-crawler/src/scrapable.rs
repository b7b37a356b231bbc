use std::fmt;
use std::path::PathBuf;

pub trait Scrapable {
    type Config: Clone;
    type Item;

    fn new(config: &Self::Config) -> anyhow::Result<Self>
    where
        Self: Sized;

    fn seed(&self) -> Seed;

    /// Page links found on a listing page, as written in the page
    fn links(&self, page: &str, location: &PageLocation) -> Vec<String>;

    /// Link to the listing page that follows this one, if any
    fn next_listing(&self, _page: &str, _location: &PageLocation) -> Option<String> {
        None
    }

    fn scrap(&mut self, page: String, location: &PageLocation) -> anyhow::Result<Self::Item>;
}

#[derive(Debug, Clone)]
pub enum Seed {
    /// A listing page whose links are the pages to scrap
    Listing(String),
    /// The pages to scrap, no listing involved
    Pages(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLocation {
    Url(String),
    Path(PathBuf),
}

impl PageLocation {
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Path(_) => None,
        }
    }
}

impl fmt::Display for PageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
