mod extractor;

pub use extractor::{GoogleFinanceExtractor, Locator, QuoteField, DAY_RANGE_SEPARATOR};

use crate::{Lookup, Row};

use std::fmt;

pub const DEFAULT_SYMBOL: &str = "AAPL";
pub const DEFAULT_EXCHANGE: &str = "NASDAQ";

const HEADER: [&str; 7] = [
    "Ação",
    "Preço Atual",
    "Preço de Abertura",
    "Preço Máximo",
    "Preço Mínimo",
    "Preço de Fechamento",
    "Volume",
];

pub fn quote_url(symbol: &str, exchange: &str) -> String {
    format!("https://www.google.com/finance/quote/{}:{}", symbol, exchange)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    pub symbol: String,
    pub price: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub previous_close: String,
    pub volume: String,
}

impl Row for QuoteRecord {
    fn header() -> &'static [&'static str] {
        &HEADER
    }

    fn fields(&self) -> Vec<&str> {
        vec![
            self.symbol.as_str(),
            self.price.as_str(),
            self.open.as_str(),
            self.high.as_str(),
            self.low.as_str(),
            self.previous_close.as_str(),
            self.volume.as_str(),
        ]
    }
}

impl fmt::Display for QuoteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Symbol          : {}", self.symbol)?;
        writeln!(f, "Price           : {}", self.price)?;
        writeln!(f, "Open            : {}", self.open)?;
        writeln!(f, "High            : {}", self.high)?;
        writeln!(f, "Low             : {}", self.low)?;
        writeln!(f, "Previous Close  : {}", self.previous_close)?;
        writeln!(f, "Volume          : {}", self.volume)?;
        Ok(())
    }
}

/// Per-field lookup outcomes for one quote page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteReport {
    pub price: Lookup,
    pub open: Lookup,
    pub high: Lookup,
    pub low: Lookup,
    pub previous_close: Lookup,
    pub volume: Lookup,
}

impl QuoteReport {
    pub fn into_record(self, symbol: &str) -> QuoteRecord {
        QuoteRecord {
            symbol: symbol.to_string(),
            price: self.price.or_sentinel(),
            open: self.open.or_sentinel(),
            high: self.high.or_sentinel(),
            low: self.low.or_sentinel(),
            previous_close: self.previous_close.or_sentinel(),
            volume: self.volume.or_sentinel(),
        }
    }
}
