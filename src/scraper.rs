use log::{error, info, warn};

use crate::client::SearchPageSource;
use crate::error::Result;
use crate::extractor::{CorpRecord, Extractor};

pub struct Scraper<S> {
    source: S,
    extractor: Extractor,
}

impl<S: SearchPageSource> Scraper<S> {
    pub fn new(source: S) -> Result<Self> {
        Ok(Scraper {
            source,
            extractor: Extractor::new()?,
        })
    }

    /// Searches each company in turn and collects every matched row.
    ///
    /// A company whose page cannot be fetched is logged and skipped; the run
    /// carries on with the next name.
    pub fn scrape(&self, corp_names: &[String]) -> Vec<CorpRecord> {
        let mut rows = Vec::new();
        let total = corp_names.len();

        for (i, corp_name) in corp_names.iter().enumerate() {
            info!("Processing {} / {} : {}", i + 1, total, corp_name);

            let html = match self.source.fetch_search_page(corp_name) {
                Ok(html) => html,
                Err(e) => {
                    error!("Failed to fetch search page for {}: {}", corp_name, e);
                    continue;
                }
            };

            let extraction = self.extractor.extract(&html, corp_name);
            info!("Found {} flex containers for {}", extraction.containers, corp_name);

            for count in &extraction.short {
                warn!("Not enough fields: found {} span tags", count);
            }
            for record in &extraction.records {
                info!(
                    "Extracted: {}, {}, {}",
                    record.corp_type, record.location, record.industry
                );
            }

            rows.extend(extraction.records);
        }

        rows
    }
}
