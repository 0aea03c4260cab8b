use scraper::Html;
use tracing::{debug, info};

pub mod csv;
pub mod google;
pub mod http;

mod error;
mod field;
mod utils;

pub use csv::CsvFile;
pub use error::ScraperError;
pub use field::{Lookup, Miss, NOT_AVAILABLE};
pub use http::HttpFetcher;

/// A flat record with a fixed column order.
pub trait Row {
    fn header() -> &'static [&'static str];
    fn fields(&self) -> Vec<&str>;
}

pub trait Extractor {
    type Record: Row;

    fn extract(&self, doc: &Html) -> Self::Record;
}

#[async_trait::async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScraperError>;
}

pub trait RecordWriter {
    fn write<R: Row>(&self, record: &R) -> Result<(), ScraperError>;
}

/// Fetches `url`, extracts one record from it and hands it to `writer`.
///
/// A fetch failure returns before anything is written.
pub async fn run_scraper<F, E, W>(
    fetcher: &F,
    extractor: &E,
    writer: &W,
    url: &str,
) -> Result<E::Record, ScraperError>
where
    F: Fetcher + Sync,
    E: Extractor,
    W: RecordWriter,
{
    let html = fetcher.fetch(url).await?;
    debug!("Fetched {} bytes from {}", html.len(), url);

    let record = {
        let doc = Html::parse_document(&html);
        extractor.extract(&doc)
    };

    writer.write(&record)?;
    info!("Record from {} written", url);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google::{GoogleFinanceExtractor, QuoteRecord};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    struct FixtureFetcher(&'static str);

    #[async_trait::async_trait]
    impl Fetcher for FixtureFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, ScraperError> {
            Ok(fs::read_to_string(self.0).expect("Invalid file path"))
        }
    }

    fn output_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.csv", name, std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[tokio::test]
    async fn test_run_scraper_writes_header_and_one_row() {
        let path = output_path("run-scraper-fixture");
        let record = run_scraper(
            &FixtureFetcher("tests/htmls/aapl.html"),
            &GoogleFinanceExtractor::new("AAPL"),
            &CsvFile::new(&path),
            "https://www.google.com/finance/quote/AAPL:NASDAQ",
        )
        .await
        .expect("Pipeline failed");

        assert_eq!(
            record,
            QuoteRecord {
                symbol: "AAPL".to_string(),
                price: "$227.52".to_string(),
                open: "$226.40".to_string(),
                high: "$228.86".to_string(),
                low: "$225.87".to_string(),
                previous_close: "$225.00".to_string(),
                volume: "48.23M".to_string(),
            }
        );

        let written = fs::read_to_string(&path).expect("Output not written");
        let lines = written.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert_eq!(line.split(',').count(), 7);
        }
        assert_eq!(
            lines[0],
            "Ação,Preço Atual,Preço de Abertura,Preço Máximo,Preço Mínimo,Preço de Fechamento,Volume"
        );
        assert_eq!(
            lines[1],
            "AAPL,$227.52,$226.40,$228.86,$225.87,$225.00,48.23M"
        );
        assert_eq!(lines[1].split(',').next(), Some("AAPL"));

        fs::remove_file(&path).expect("Cannot clean up output");
    }

    #[tokio::test]
    async fn test_run_scraper_succeeds_when_nothing_matches() {
        let path = output_path("run-scraper-empty");
        let record = run_scraper(
            &FixtureFetcher("tests/htmls/unrelated.html"),
            &GoogleFinanceExtractor::new("AAPL"),
            &CsvFile::new(&path),
            "https://example.com/",
        )
        .await
        .expect("Pipeline failed");

        assert_eq!(
            record.fields(),
            vec!["AAPL", "N/A", "N/A", "N/A", "N/A", "N/A", "N/A"]
        );
        let written = fs::read_to_string(&path).expect("Output not written");
        assert_eq!(written.lines().nth(1), Some("AAPL,N/A,N/A,N/A,N/A,N/A,N/A"));

        fs::remove_file(&path).expect("Cannot clean up output");
    }

    /// Accepts one connection, answers it with `500` and returns the raw request.
    async fn serve_internal_error(listener: TcpListener) -> String {
        let (mut socket, _) = listener.accept().await.expect("Cannot accept");
        let mut request: Vec<u8> = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).await.expect("Cannot read request");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
        }
        socket
            .write_all(
                b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
            )
            .await
            .expect("Cannot write response");
        String::from_utf8_lossy(&request).into_owned()
    }

    #[tokio::test]
    async fn test_error_status_is_a_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Cannot bind listener");
        let addr = listener.local_addr().expect("No local address");
        let server = tokio::spawn(serve_internal_error(listener));

        let path = output_path("run-scraper-error-status");
        let result = run_scraper(
            &HttpFetcher::new().expect("Cannot build client"),
            &GoogleFinanceExtractor::new("AAPL"),
            &CsvFile::new(&path),
            &format!("http://{}/finance/quote/AAPL:NASDAQ", addr),
        )
        .await;

        assert!(matches!(result, Err(ScraperError::Request(_))));
        assert!(!path.exists());

        let request = server.await.expect("Server task failed");
        let user_agent = request
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("user-agent")
                    .then(|| value.trim().to_string())
            })
            .expect("No user-agent header sent");
        assert_eq!(user_agent, http::USER_AGENT);
    }

    #[tokio::test]
    async fn test_fetch_failure_writes_nothing() {
        let path = output_path("run-scraper-unreachable");
        let result = run_scraper(
            &HttpFetcher::new().expect("Cannot build client"),
            &GoogleFinanceExtractor::new("AAPL"),
            &CsvFile::new(&path),
            "not a url",
        )
        .await;

        assert!(matches!(result, Err(ScraperError::Request(_))));
        assert!(!path.exists());
    }
}
