//! Leading-number parsing for numeric form inputs.
//!
//! Leading whitespace is skipped, the longest numeric prefix is taken and
//! trailing text is ignored. No prefix means "no value". Only ASCII digits
//! count, whatever script the rest of the input is in.

use std::sync::LazyLock;

use regex::Regex;

static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+").expect("valid hardcoded regex"));

static LEADING_DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").expect("valid hardcoded regex")
});

/// Base-10 integer prefix of `raw`, or `None` if there is none.
///
/// A prefix too long for `i64` saturates at `i64::MAX` / `i64::MIN`.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let digits = LEADING_INT.find(raw.trim_start())?.as_str();
    match digits.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) if digits.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Decimal prefix of `raw`, or `None` if there is none or it is not finite.
pub fn parse_leading_decimal(raw: &str) -> Option<f64> {
    let number = LEADING_DECIMAL.find(raw.trim_start())?;
    number
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
