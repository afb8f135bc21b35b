use std::fmt;

/// The helper's diagnostic text did not carry a device count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticError {
    /// The text has no `" of "` marker.
    MissingMarker,
    /// Nothing follows the marker.
    MissingCount,
    /// The character after the marker is not a decimal digit.
    NotADigit(char),
}

impl fmt::Display for DiagnosticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticError::MissingMarker => {
                write!(f, "device diagnostic has no \" of \" marker")
            }
            DiagnosticError::MissingCount => {
                write!(f, "device diagnostic ends right after \" of \"")
            }
            DiagnosticError::NotADigit(c) => {
                write!(f, "device diagnostic has {c:?} where the device count should be")
            }
        }
    }
}

impl std::error::Error for DiagnosticError {}
