use clap::Parser;
use finance_quote_scraper::csv::DEFAULT_OUTPUT;
use finance_quote_scraper::google::{self, GoogleFinanceExtractor, DEFAULT_EXCHANGE, DEFAULT_SYMBOL};
use finance_quote_scraper::{run_scraper, CsvFile, HttpFetcher, ScraperError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

/// Scrape one Google Finance quote page into a CSV file.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Ticker symbol, also written as the first CSV column
    #[arg(long, default_value = DEFAULT_SYMBOL)]
    symbol: String,

    /// Exchange suffix of the quote page, as in `AAPL:NASDAQ`
    #[arg(long, default_value = DEFAULT_EXCHANGE)]
    exchange: String,

    /// Full page URL, overrides the one built from symbol and exchange
    #[arg(long)]
    url: Option<String>,

    /// CSV file to write, replaced on every run
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let args = Args::parse();
    let url = args
        .url
        .unwrap_or_else(|| google::quote_url(&args.symbol, &args.exchange));

    let fetcher = match HttpFetcher::new() {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!("Cannot build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let extractor = GoogleFinanceExtractor::new(args.symbol);
    let writer = CsvFile::new(args.output);

    match run_scraper(&fetcher, &extractor, &writer, &url).await {
        Ok(record) => {
            debug!("\n{}", record);
            println!("Dados de web scraping salvos com sucesso!");
            ExitCode::SUCCESS
        }
        Err(e @ ScraperError::Request(_)) => {
            eprintln!("Erro ao fazer a requisição: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
