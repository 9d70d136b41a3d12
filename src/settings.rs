use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.jobkorea.co.kr/Search/";

/// Desktop Chrome, so the site serves the same markup a browser gets.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Knobs for a single scrape run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    /// Results page requested for every company. Only one page is ever fetched.
    pub page_no: u32,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_no: 1,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}
