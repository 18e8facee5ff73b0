//! Lenient number parsing.

use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::string::is_blank;

/// Parses `value` as a decimal number, returning `None` if it is absent, blank
/// or not a number. Invalid input is logged.
///
/// Both plain (`-123.45`) and scientific (`1.5e3`) notation are accepted, with
/// no limit on precision.
pub fn safe_parse_decimal<'a>(value: impl Into<Option<&'a str>>) -> Option<BigDecimal> {
  let value = value.into()?;
  if is_blank(value) {
    return None;
  }

  match parse_decimal(value) {
    Some(decimal) => Some(decimal),
    None => {
      log::warn!("Can't parse a decimal from {value:?}");
      None
    },
  }
}

fn parse_decimal(value: &str) -> Option<BigDecimal> {
  // Digit separators are accepted by the big integer parser but are not part
  // of the plain number syntax.
  if value.contains('_') {
    return None;
  }
  BigDecimal::from_str(value).ok()
}
