//! Duration parsing and formatting.

use chrono::TimeDelta;
use thiserror::Error;

use crate::string::is_blank;

/// The number of milliseconds in an hour.
pub const HOUR_MILLIS: u64 = 60 * MINUTE_MILLIS;

/// The number of milliseconds in a minute.
pub const MINUTE_MILLIS: u64 = 60 * SECOND_MILLIS;

/// The number of milliseconds in a second.
pub const SECOND_MILLIS: u64 = 1000;

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const MAX_FRACTION_DIGITS: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDurationError {
  #[error("duration must start with 'P'")]
  MissingDesignator,
  #[error("duration has no components")]
  Empty,
  #[error("expected a number at offset {0}")]
  ExpectedNumber(usize),
  #[error("unexpected {found:?} at offset {offset}")]
  Unexpected { found: char, offset: usize },
  #[error("unexpected end of input")]
  UnexpectedEnd,
  #[error("duration is out of range")]
  OutOfRange,
}

/// Formats a duration given in milliseconds as `HH:mm:ss.SSS`.
///
/// Hours are not wrapped into days, so long durations get more hour digits.
pub fn format_duration_hms(millis: u64) -> String {
  let hours = millis / HOUR_MILLIS;
  let minutes = millis % HOUR_MILLIS / MINUTE_MILLIS;
  let seconds = millis % MINUTE_MILLIS / SECOND_MILLIS;
  let millis = millis % SECOND_MILLIS;
  format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

/// Parses `value` as a duration, returning `None` if it is absent, blank or
/// not a valid ISO-8601 duration. Invalid input is logged.
pub fn as_duration<'a>(value: impl Into<Option<&'a str>>) -> Option<TimeDelta> {
  let value = value.into()?;
  if is_blank(value) {
    return None;
  }

  match parse_duration(value) {
    Ok(duration) => Some(duration),
    Err(err) => {
      log::warn!("Error parsing {value:?} to a duration: {err}");
      None
    },
  }
}

/// Parses an ISO-8601 duration of the form `PnDTnHnMn.nS`.
///
/// The whole duration and each component may carry a sign, designators are
/// case-insensitive and seconds take up to nine fractional digits (after a `.`
/// or `,`). At least one component must be present, and a `T` must be
/// followed by at least one time component.
///
/// ```
/// use chrono::TimeDelta;
/// use the_util::time::parse_duration;
///
/// assert_eq!(parse_duration("PT5M"), Ok(TimeDelta::minutes(5)));
/// assert_eq!(parse_duration("-P1DT-1H"), Ok(TimeDelta::hours(-23)));
/// ```
pub fn parse_duration(value: &str) -> Result<TimeDelta, ParseDurationError> {
  let mut cursor = Cursor { src: value, pos: 0 };

  let negate = cursor.sign();
  if !cursor.eat_ignore_case('P') {
    return Err(ParseDurationError::MissingDesignator);
  }

  let mut nanos: i128 = 0;
  let mut components = 0;

  if !cursor.is_at_end() && !cursor.peek_is_ignore_case('T') {
    let component = cursor.component()?;
    if component.unit != Unit::Day {
      return Err(cursor.unexpected_at(component.unit_offset));
    }
    nanos = component.add_to(nanos)?;
    components += 1;
  }

  if cursor.eat_ignore_case('T') {
    let mut last = Unit::Day;
    loop {
      let component = cursor.component()?;
      if component.unit <= last {
        return Err(cursor.unexpected_at(component.unit_offset));
      }
      last = component.unit;
      nanos = component.add_to(nanos)?;
      components += 1;
      if cursor.is_at_end() {
        break;
      }
    }
  }

  if !cursor.is_at_end() {
    return Err(cursor.unexpected_at(cursor.pos));
  }
  if components == 0 {
    return Err(ParseDurationError::Empty);
  }

  if negate {
    nanos = -nanos;
  }
  to_time_delta(nanos)
}

fn to_time_delta(nanos: i128) -> Result<TimeDelta, ParseDurationError> {
  let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SECOND))
    .map_err(|_| ParseDurationError::OutOfRange)?;
  // rem_euclid of a positive modulus is always in 0..1e9
  let subsec = nanos.rem_euclid(NANOS_PER_SECOND) as u32;
  TimeDelta::new(secs, subsec).ok_or(ParseDurationError::OutOfRange)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Unit {
  Day,
  Hour,
  Minute,
  Second,
}

impl Unit {
  fn from_char(ch: char) -> Option<Self> {
    match ch.to_ascii_uppercase() {
      'D' => Some(Self::Day),
      'H' => Some(Self::Hour),
      'M' => Some(Self::Minute),
      'S' => Some(Self::Second),
      _ => None,
    }
  }

  const fn nanos(self) -> i128 {
    match self {
      Self::Day => 24 * 60 * 60 * NANOS_PER_SECOND,
      Self::Hour => 60 * 60 * NANOS_PER_SECOND,
      Self::Minute => 60 * NANOS_PER_SECOND,
      Self::Second => NANOS_PER_SECOND,
    }
  }
}

/// One `<number><unit>` group, e.g. `-12H` or `1.5S`.
#[derive(Debug)]
struct Component {
  whole:       i64,
  /// Fraction of the component in nanoseconds, already carrying its sign.
  fraction:    i128,
  unit:        Unit,
  unit_offset: usize,
}

impl Component {
  fn add_to(&self, total: i128) -> Result<i128, ParseDurationError> {
    i128::from(self.whole)
      .checked_mul(self.unit.nanos())
      .and_then(|nanos| nanos.checked_add(self.fraction))
      .and_then(|nanos| total.checked_add(nanos))
      .ok_or(ParseDurationError::OutOfRange)
  }
}

struct Cursor<'a> {
  src: &'a str,
  pos: usize,
}

impl<'a> Cursor<'a> {
  fn peek(&self) -> Option<char> {
    self.src[self.pos..].chars().next()
  }

  fn is_at_end(&self) -> bool {
    self.pos == self.src.len()
  }

  fn bump(&mut self) {
    if let Some(ch) = self.peek() {
      self.pos += ch.len_utf8();
    }
  }

  fn peek_is_ignore_case(&self, expected: char) -> bool {
    self
      .peek()
      .is_some_and(|ch| ch.eq_ignore_ascii_case(&expected))
  }

  fn eat_ignore_case(&mut self, expected: char) -> bool {
    let matched = self.peek_is_ignore_case(expected);
    if matched {
      self.bump();
    }
    matched
  }

  /// Consumes an optional sign, returning `true` for `-`.
  fn sign(&mut self) -> bool {
    match self.peek() {
      Some('-') => {
        self.bump();
        true
      },
      Some('+') => {
        self.bump();
        false
      },
      _ => false,
    }
  }

  fn digits(&mut self) -> &'a str {
    let start = self.pos;
    while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
      self.bump();
    }
    &self.src[start..self.pos]
  }

  fn component(&mut self) -> Result<Component, ParseDurationError> {
    let negative = self.sign();
    let number_offset = self.pos;
    let digits = self.digits();
    if digits.is_empty() {
      return Err(match self.peek() {
        Some(_) => ParseDurationError::ExpectedNumber(number_offset),
        None => ParseDurationError::UnexpectedEnd,
      });
    }
    let mut whole: i64 = digits.parse().map_err(|_| ParseDurationError::OutOfRange)?;

    let mut fraction = 0;
    let fraction_offset = self.pos;
    if matches!(self.peek(), Some('.' | ',')) {
      self.bump();
      let digits = self.digits();
      if digits.len() > MAX_FRACTION_DIGITS {
        return Err(self.unexpected_at(fraction_offset + 1 + MAX_FRACTION_DIGITS));
      }
      // right-pad to nanosecond precision: "5" -> 500_000_000
      fraction = format!("{digits:0<9}")
        .parse::<i128>()
        .map_err(|_| ParseDurationError::OutOfRange)?;
    }

    if negative {
      whole = -whole;
      fraction = -fraction;
    }

    let unit_offset = self.pos;
    let unit = match self.peek() {
      Some(ch) => Unit::from_char(ch).ok_or(self.unexpected_at(unit_offset))?,
      None => return Err(ParseDurationError::UnexpectedEnd),
    };
    if unit != Unit::Second && self.pos != fraction_offset {
      return Err(self.unexpected_at(fraction_offset));
    }
    self.bump();

    Ok(Component {
      whole,
      fraction,
      unit,
      unit_offset,
    })
  }

  fn unexpected_at(&self, offset: usize) -> ParseDurationError {
    match self.src[offset..].chars().next() {
      Some(found) => ParseDurationError::Unexpected { found, offset },
      None => ParseDurationError::UnexpectedEnd,
    }
  }
}
