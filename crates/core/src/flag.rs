//! Boolean normalisation for string-coded flags.

use crate::error::{StockError, StockResult};

/// Parse a string-coded boolean (`"true"`/`"false"`, `"1"`/`"0"`, `"yes"`/`"no"`).
///
/// Matching is case-insensitive and ignores surrounding whitespace.
pub fn parse_flag(raw: &str) -> StockResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(StockError::invalid(format!("not a boolean flag: {other:?}"))),
    }
}
