use crate::{RecordWriter, Row, ScraperError};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::info;

pub const DEFAULT_OUTPUT: &str = "stock_data_google_finance.csv";

const LINE_TERMINATOR: &str = "\r\n";

/// A CSV file holding a header and a single data row. Every write replaces
/// the previous content.
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordWriter for CsvFile {
    fn write<R: Row>(&self, record: &R) -> Result<(), ScraperError> {
        fs::write(&self.path, render(record)).map_err(|source| ScraperError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!("Saved {}", self.path.display());
        Ok(())
    }
}

pub fn render<R: Row>(record: &R) -> String {
    let mut out = String::new();
    push_row(&mut out, R::header().iter().copied());
    push_row(&mut out, record.fields());
    out
}

pub fn write_to<R: Row, W: io::Write>(record: &R, mut writer: W) -> io::Result<()> {
    writer.write_all(render(record).as_bytes())?;
    writer.flush()
}

fn push_row<'a, I: IntoIterator<Item = &'a str>>(out: &mut String, fields: I) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str(LINE_TERMINATOR);
}

fn push_field(out: &mut String, field: &str) {
    if field.contains(|c: char| matches!(c, ',' | '"' | '\r' | '\n')) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
