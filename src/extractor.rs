use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};

// Class names as currently emitted by the JobKorea search page. Any redesign breaks these.
const ROW_CLASSES: [&str; 3] = [
    "Flex_display_flex__i0l0hl2",
    "Flex_direction_row__i0l0hl3",
    "Flex_justify_space-between__i0l0hlf",
];
const INFO_CLASSES: [&str; 3] = [
    "Flex_display_flex__i0l0hl2",
    "Flex_gap_space12__i0l0hls",
    "Flex_direction_row__i0l0hl3",
];
const FIELD_CLASS: &str = "Typography_variant_size14__344nw27";

/// One company row from the search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpRecord {
    /// Company name that was searched for.
    pub query: String,
    /// 기업형태
    pub corp_type: String,
    /// 지역
    pub location: String,
    /// 업종
    pub industry: String,
}

/// Everything pulled out of one results page.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Number of outer row containers on the page.
    pub containers: usize,
    pub records: Vec<CorpRecord>,
    /// Span counts of info blocks that had fewer than three fields.
    pub short: Vec<usize>,
}

pub struct Extractor {
    row: Selector,
    info: Selector,
    field: Selector,
}

impl Extractor {
    pub fn new() -> Result<Self> {
        Ok(Extractor {
            row: class_selector("div", &ROW_CLASSES)?,
            info: class_selector("div", &INFO_CLASSES)?,
            field: class_selector("span", &[FIELD_CLASS])?,
        })
    }

    pub fn extract(&self, html: &str, query: &str) -> Extraction {
        let document = Html::parse_document(html);
        let mut out = Extraction::default();

        for row in document
            .select(&self.row)
            .filter(|el| has_exact_classes(el, ROW_CLASSES.len()))
        {
            out.containers += 1;

            let Some(info) = row
                .select(&self.info)
                .find(|el| el.id() != row.id() && has_exact_classes(el, INFO_CLASSES.len()))
            else {
                continue;
            };

            let spans: Vec<ElementRef> = info.select(&self.field).collect();

            if spans.len() < 3 {
                out.short.push(spans.len());
                continue;
            }

            out.records.push(CorpRecord {
                query: query.to_string(),
                corp_type: stripped_text(&spans[0]),
                location: stripped_text(&spans[1]),
                industry: stripped_text(&spans[2]),
            });
        }

        out
    }
}

fn class_selector(tag: &str, classes: &[&str]) -> Result<Selector> {
    let css = format!("{}.{}", tag, classes.join("."));
    Selector::parse(&css).map_err(|e| Error::InvalidSelector {
        selector: css.clone(),
        reason: format!("{:?}", e),
    })
}

/// Container divs must list exactly the wanted classes, nothing extra.
fn has_exact_classes(el: &ElementRef, count: usize) -> bool {
    el.value().classes().count() == count
}

/// Trims every text node and joins them without a separator.
fn stripped_text(el: &ElementRef) -> String {
    el.text().map(str::trim).filter(|s| !s.is_empty()).collect()
}
