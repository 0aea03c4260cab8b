use crate::{
    google::{QuoteRecord, QuoteReport},
    utils, Extractor, Lookup, Miss,
};
use lazy_regex::regex;
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use tracing::{debug, warn};

pub const DAY_RANGE_SEPARATOR: &str = " - ";

const E: &str = "Invalid selector";
lazy_static! {
    static ref PRICE: Selector = Selector::parse(r#"div[class="YMlKec fxKbKc"]"#).expect(E);
    static ref LABEL: Selector = Selector::parse("div").expect(E);
    static ref VALUE: Selector = Selector::parse("div.P6K39c").expect(E);
}

/// How a field is found in the page.
#[derive(Debug, Clone, Copy)]
pub enum Locator {
    /// First element matching the selector.
    Element(&'static Selector),
    /// First `div` whose text is exactly `label`, then the next `value` after it.
    Labeled {
        label: &'static str,
        value: &'static Selector,
    },
}

impl Locator {
    pub fn locate(&self, doc: &Html) -> Lookup {
        match *self {
            Locator::Element(selector) => match doc.select(selector).next() {
                Some(el) => Lookup::Found(utils::trimmed_text(el)),
                None => Lookup::Missing(Miss::NoElement),
            },
            Locator::Labeled { label, value } => {
                let Some(anchor) = doc
                    .select(&LABEL)
                    .find(|el| utils::sole_string(*el) == Some(label))
                else {
                    return Lookup::Missing(Miss::NoLabel);
                };

                match utils::find_next(doc, anchor, value) {
                    Some(el) => Lookup::Found(utils::trimmed_text(el)),
                    None => Lookup::Missing(Miss::NoValue),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteField {
    Price,
    PreviousClose,
    Open,
    DayRange,
    Volume,
}

impl QuoteField {
    pub const ALL: [QuoteField; 5] = [
        QuoteField::Price,
        QuoteField::PreviousClose,
        QuoteField::Open,
        QuoteField::DayRange,
        QuoteField::Volume,
    ];

    pub fn locator(self) -> Locator {
        match self {
            QuoteField::Price => Locator::Element(&*PRICE),
            QuoteField::PreviousClose => Locator::Labeled {
                label: "Previous close",
                value: &*VALUE,
            },
            QuoteField::Open => Locator::Labeled {
                label: "Open",
                value: &*VALUE,
            },
            QuoteField::DayRange => Locator::Labeled {
                label: "Day range",
                value: &*VALUE,
            },
            QuoteField::Volume => Locator::Labeled {
                label: "Volume",
                value: &*VALUE,
            },
        }
    }
}

/// Splits `"<low> - <high>"` into `(low, high)`.
///
/// Anything other than exactly one separator is malformed and yields the
/// same miss for both sides.
pub(crate) fn split_day_range(range: &str) -> (Lookup, Lookup) {
    let parts = range.split(DAY_RANGE_SEPARATOR).collect::<Vec<_>>();
    if let [low, high] = parts.as_slice() {
        return (
            Lookup::Found(low.to_string()),
            Lookup::Found(high.to_string()),
        );
    }

    if regex!(r"\s[\x{2012}-\x{2015}\x{2212}]\s").is_match(range) {
        warn!("Day range {:?} uses a non-ASCII dash as separator", range);
    } else {
        warn!(
            "Day range {:?} does not contain exactly one {:?}",
            range, DAY_RANGE_SEPARATOR
        );
    }
    let miss = Lookup::Missing(Miss::Malformed(range.to_string()));
    (miss.clone(), miss)
}

#[derive(Debug)]
pub struct GoogleFinanceExtractor {
    symbol: String,
}

impl GoogleFinanceExtractor {
    pub fn new<S: Into<String>>(symbol: S) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    fn lookup(&self, doc: &Html, field: QuoteField) -> Lookup {
        let lookup = field.locator().locate(doc);
        if let Lookup::Missing(miss) = &lookup {
            debug!("{} {:?}: {}", self.symbol, field, miss);
        }
        lookup
    }

    pub fn report(&self, doc: &Html) -> QuoteReport {
        let (low, high) = match self.lookup(doc, QuoteField::DayRange) {
            Lookup::Found(range) => split_day_range(&range),
            missing => (missing.clone(), missing),
        };

        let report = QuoteReport {
            price: self.lookup(doc, QuoteField::Price),
            open: self.lookup(doc, QuoteField::Open),
            high,
            low,
            previous_close: self.lookup(doc, QuoteField::PreviousClose),
            volume: self.lookup(doc, QuoteField::Volume),
        };

        let lookups = [
            &report.price,
            &report.open,
            &report.high,
            &report.low,
            &report.previous_close,
            &report.volume,
        ];
        let found = lookups.iter().filter(|lookup| lookup.is_found()).count();
        debug!("{}: {} of {} fields found", self.symbol, found, lookups.len());
        report
    }
}

impl Extractor for GoogleFinanceExtractor {
    type Record = QuoteRecord;

    fn extract(&self, doc: &Html) -> Self::Record {
        self.report(doc).into_record(&self.symbol)
    }
}
