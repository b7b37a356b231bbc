pub mod listing;
pub mod model;
pub mod page;
mod quiz;
pub mod quiz_options;
pub mod selectors;
pub mod writer;

pub use crate::model::{AnswerOption, Question, Test};
pub use crate::quiz::{scrap_page, QuizScraper, QuizScraperConfig, DEFAULT_LISTING_URL};
pub use crate::selectors::{SelectorConfig, Selectors};

pub use anyhow;
