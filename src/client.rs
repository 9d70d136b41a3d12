use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use log::{debug, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::settings::Settings;

/// Anything that can hand back the search-results HTML for a company name.
pub trait SearchPageSource {
    fn fetch_search_page(&self, corp_name: &str) -> Result<String>;
}

/// Builds the corporate-tab search URL for one company on one results page.
pub fn search_url(base: &str, corp_name: &str, page_no: u32) -> String {
    format!(
        "{}?stext={}&tabType=corp&Page_No={}",
        base,
        urlencoding::encode(corp_name),
        page_no
    )
}

pub struct JobKoreaClient {
    client: Client,
    base_url: String,
    page_no: u32,
}

impl JobKoreaClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        validate_base_url(&settings.base_url)?;

        let mut headers = HeaderMap::new();
        let ua = HeaderValue::from_str(&settings.user_agent)
            .map_err(|_| Error::InvalidUserAgent(settings.user_agent.clone()))?;
        headers.insert(USER_AGENT, ua);

        let client = Client::builder()
            .timeout(settings.timeout)
            .default_headers(headers)
            .build()?;

        Ok(JobKoreaClient {
            client,
            base_url: settings.base_url.clone(),
            page_no: settings.page_no,
        })
    }

    pub fn url_for(&self, corp_name: &str) -> String {
        search_url(&self.base_url, corp_name, self.page_no)
    }
}

impl SearchPageSource for JobKoreaClient {
    fn fetch_search_page(&self, corp_name: &str) -> Result<String> {
        let url = self.url_for(corp_name);
        debug!("GET {}", url);

        let resp = self.client.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            // The body is still parsed; an error page simply yields no containers.
            warn!("Search for '{}' returned status {}", corp_name, status);
        }
        Ok(resp.text()?)
    }
}

fn validate_base_url(base: &str) -> Result<()> {
    let parsed = Url::parse(base).map_err(|e| Error::InvalidBaseUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::InvalidBaseUrl {
            url: base.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
