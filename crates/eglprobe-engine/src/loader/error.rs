use std::fmt;

/// Failure to bring up a native library.
#[derive(Debug)]
pub enum LoadError {
    /// No candidate name could be opened.
    NotFound {
        tried: Vec<String>,
        last: Option<libloading::Error>,
    },
    /// The library opened but lacks a required entry point.
    MissingSymbol {
        library: String,
        symbol: &'static str,
    },
}

impl LoadError {
    /// `true` when the library is simply not installed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound { tried, .. } if tried.is_empty() => {
                write!(f, "no library candidates to load")
            }
            LoadError::NotFound { tried, .. } => {
                write!(f, "unable to load any of: {}", tried.join(", "))
            }
            LoadError::MissingSymbol { library, symbol, .. } => {
                write!(f, "{library} does not export {symbol}")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::NotFound { last, .. } => last
                .as_ref()
                .map(|e| e as &(dyn std::error::Error + 'static)),
            LoadError::MissingSymbol { .. } => None,
        }
    }
}
