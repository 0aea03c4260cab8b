use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("Cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
