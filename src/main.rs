use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use jobkorea_scraper_lib::{input_loader, logger, output, JobKoreaClient, Scraper, Settings};
use jobkorea_scraper_lib::settings::DEFAULT_BASE_URL;

const DEFAULT_COMPANY: &str = "벡스인텔리전스";

/// Look up companies on JobKorea and export company type, location and industry.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Company names to search for
    names: Vec<String>,

    /// CSV or Excel file with a 기업명 (or "company") column
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the CSV
    #[arg(short, long, default_value = output::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Search results page to request for every company
    #[arg(long, default_value_t = 1)]
    page: u32,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Prefix each row with the name that was searched
    #[arg(long)]
    include_query: bool,

    /// Rows to print after writing (0 to disable)
    #[arg(long, default_value_t = 5)]
    preview: usize,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, action = clap::ArgAction::Count)]
    quiet: u8,
}

fn collect_names(cli: &Cli) -> Result<Vec<String>> {
    let mut names = cli.names.clone();
    if let Some(path) = &cli.input {
        let from_file = input_loader::load_company_names(path)
            .with_context(|| format!("Failed to load company names from {:?}", path))?;
        names.extend(from_file);
    }

    let names = input_loader::dedup_names(names);
    if names.is_empty() {
        warn!("No company names given; searching the default '{}'", DEFAULT_COMPANY);
        return Ok(vec![DEFAULT_COMPANY.to_string()]);
    }
    Ok(names)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(logger::level_from_flags(cli.verbose, cli.quiet));

    let names = collect_names(&cli)?;
    info!("Searching JobKorea for {} companies", names.len());

    let settings = Settings {
        base_url: cli.base_url.clone(),
        page_no: cli.page,
        timeout: Duration::from_secs(cli.timeout),
        ..Settings::default()
    };
    let client = JobKoreaClient::new(&settings).context("Failed to build HTTP client")?;
    let scraper = Scraper::new(client).context("Failed to prepare extractor")?;

    let records = scraper.scrape(&names);

    output::save_csv(&cli.output, &records, cli.include_query)
        .with_context(|| format!("Failed to write {:?}", cli.output))?;

    if cli.preview > 0 {
        print!("{}", output::preview(&records, cli.preview, cli.include_query));
    }

    info!("Done. {} rows extracted.", records.len());
    Ok(())
}
