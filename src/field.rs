use std::fmt;

/// Placeholder written for every field that could not be resolved.
pub const NOT_AVAILABLE: &str = "N/A";

/// Outcome of locating a single field in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(String),
    Missing(Miss),
}

/// Why a field could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Miss {
    /// No element carries the expected class signature.
    NoElement,
    /// The caption element is not in the document.
    NoLabel,
    /// The caption exists but nothing matching follows it.
    NoValue,
    /// A value was located but does not have the expected shape.
    Malformed(String),
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Collapses the outcome into its text, or [`NOT_AVAILABLE`].
    pub fn or_sentinel(self) -> String {
        match self {
            Lookup::Found(value) => value,
            Lookup::Missing(_) => NOT_AVAILABLE.to_string(),
        }
    }
}

impl fmt::Display for Miss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Miss::NoElement => write!(f, "element not found"),
            Miss::NoLabel => write!(f, "label not found"),
            Miss::NoValue => write!(f, "no value after label"),
            Miss::Malformed(raw) => write!(f, "malformed value {:?}", raw),
        }
    }
}
