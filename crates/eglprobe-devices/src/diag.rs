//! Device-count extraction from the helper's stderr.

use crate::error::DiagnosticError;

/// Separator that precedes the device count, as in `"device 0 of 3 ..."`.
pub const COUNT_MARKER: &str = " of ";

/// Reads the device count from text shaped like `"<prefix> of <N><suffix>"`.
///
/// Only the first occurrence of the marker counts, and only the single
/// character after it is read, so `N` is limited to `0..=9`: a diagnostic
/// reporting 12 devices yields 1.
pub fn parse_device_count(text: &str) -> Result<usize, DiagnosticError> {
    let (_, tail) = text
        .split_once(COUNT_MARKER)
        .ok_or(DiagnosticError::MissingMarker)?;

    let first = tail.chars().next().ok_or(DiagnosticError::MissingCount)?;
    first
        .to_digit(10)
        .map(|n| n as usize)
        .ok_or(DiagnosticError::NotADigit(first))
}
