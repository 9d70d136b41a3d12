pub mod client;
pub mod error;
pub mod extractor;
pub mod input_loader;
pub mod logger;
pub mod output;
pub mod scraper;
pub mod settings;

// Exporting types for convenience
pub use crate::client::{search_url, JobKoreaClient, SearchPageSource};
pub use crate::error::{Error, Result};
pub use crate::extractor::{CorpRecord, Extraction, Extractor};
pub use crate::scraper::Scraper;
pub use crate::settings::Settings;
