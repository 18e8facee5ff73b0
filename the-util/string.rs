//! String helpers: padding, truncation and null-aware predicates.
//!
//! Lengths are measured in `char`s throughout, and truncation always cuts on a
//! `char` boundary.

use std::borrow::Cow;

use unicode_general_category::{
  GeneralCategory,
  get_general_category,
};

/// The empty string.
pub const EMPTY: &str = "";

/// Marker appended by [`truncate_with_marker`].
pub const TRUNCATION_MARKER: &str = "..";

const TRUNCATION_MARKER_LEN: usize = TRUNCATION_MARKER.len();

/// The platform's line separator.
#[cfg(target_os = "windows")]
pub const NEW_LINE: &str = "\r\n";

/// The platform's line separator.
#[cfg(not(target_os = "windows"))]
pub const NEW_LINE: &str = "\n";

/// Which side of the input the fill characters go on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Padding {
  /// Fill before the input.
  Left,
  /// Fill after the input.
  Right,
}

impl Padding {
  /// Joins `input` and `pad` in the order this side calls for.
  pub fn concat(self, input: &str, pad: &str) -> String {
    let mut out = String::with_capacity(input.len() + pad.len());
    match self {
      Self::Left => {
        out.push_str(pad);
        out.push_str(input);
      },
      Self::Right => {
        out.push_str(input);
        out.push_str(pad);
      },
    }
    out
  }
}

/// Returns `true` if the value is absent or has zero length.
pub fn is_empty<'a>(value: impl Into<Option<&'a str>>) -> bool {
  value.into().is_none_or(str::is_empty)
}

/// Returns the number of `char`s in the value, or 0 if it is absent.
pub fn length<'a>(value: impl Into<Option<&'a str>>) -> usize {
  value.into().map_or(0, |value| value.chars().count())
}

/// Returns `true` if the value is absent, empty or whitespace only.
pub fn is_blank<'a>(value: impl Into<Option<&'a str>>) -> bool {
  value.into().is_none_or(|value| value.chars().all(char::is_whitespace))
}

pub fn to_upper_case<'a>(value: impl Into<Option<&'a str>>) -> Option<String> {
  value.into().map(str::to_uppercase)
}

pub fn to_lower_case<'a>(value: impl Into<Option<&'a str>>) -> Option<String> {
  value.into().map(str::to_lowercase)
}

/// Shortens `input` to at most `max_len` chars, ending it with
/// [`TRUNCATION_MARKER`] when there is room for it.
///
/// Blank input and input that already fits are returned untouched. When
/// `max_len` is no longer than the marker, a plain prefix is returned instead.
///
/// ```
/// use the_util::string::truncate_with_marker;
///
/// assert_eq!(truncate_with_marker("abcdef", 4), "ab..");
/// assert_eq!(truncate_with_marker("abcdef", 2), "ab");
/// assert_eq!(truncate_with_marker("abc", 3), "abc");
/// ```
pub fn truncate_with_marker(input: &str, max_len: usize) -> Cow<'_, str> {
  if is_blank(input) {
    return Cow::Borrowed(input);
  }
  let Some(cut) = char_index(input, max_len) else {
    return Cow::Borrowed(input);
  };

  if max_len <= TRUNCATION_MARKER_LEN {
    return Cow::Borrowed(&input[..cut]);
  }

  let keep = char_index(input, max_len - TRUNCATION_MARKER_LEN).unwrap_or(cut);
  let mut out = String::with_capacity(keep + TRUNCATION_MARKER_LEN);
  out.push_str(&input[..keep]);
  out.push_str(TRUNCATION_MARKER);
  Cow::Owned(out)
}

/// Pads `input` with `fill` on the given side until it is `size` chars long.
///
/// Input that is already at least `size` chars long is returned untouched.
pub fn pad(input: &str, size: usize, fill: char, padding: Padding) -> Cow<'_, str> {
  let missing = size.saturating_sub(input.chars().count());
  if missing == 0 {
    return Cow::Borrowed(input);
  }
  let fill: String = std::iter::repeat_n(fill, missing).collect();
  Cow::Owned(padding.concat(input, &fill))
}

pub fn left_pad(input: &str, size: usize, fill: char) -> Cow<'_, str> {
  pad(input, size, fill, Padding::Left)
}

pub fn right_pad(input: &str, size: usize, fill: char) -> Cow<'_, str> {
  pad(input, size, fill, Padding::Right)
}

/// Appends each of `others` to `value`, separated by `delimiter`.
pub fn concat_with<S: AsRef<str>>(value: &str, delimiter: char, others: &[S]) -> String {
  let mut out = String::from(value);
  for other in others {
    out.push(delimiter);
    out.push_str(other.as_ref());
  }
  out
}

/// Joins `values` with `delimiter` between each pair.
pub fn join<S: AsRef<str>>(delimiter: char, values: &[S]) -> String {
  let mut out = String::new();
  for (i, value) in values.iter().enumerate() {
    if i > 0 {
      out.push(delimiter);
    }
    out.push_str(value.as_ref());
  }
  out
}

/// Returns a new list holding `value` followed by `others`.
pub fn prepend<T: Clone>(value: T, others: &[T]) -> Vec<T> {
  let mut out = Vec::with_capacity(others.len() + 1);
  out.push(value);
  out.extend_from_slice(others);
  out
}

/// Returns `true` if `value` is exactly `len` chars long and every char is a
/// decimal digit (in any script).
pub fn only_digits<'a>(value: impl Into<Option<&'a str>>, len: usize) -> bool {
  let Some(value) = value.into() else {
    return false;
  };
  let mut count = 0;
  for ch in value.chars() {
    if count == len || !char_is_decimal_digit(ch) {
      return false;
    }
    count += 1;
  }
  count == len
}

#[inline]
fn char_is_decimal_digit(ch: char) -> bool {
  matches!(get_general_category(ch), GeneralCategory::DecimalNumber)
}

/// Byte offset of the char at index `n`, or `None` if `s` has `n` chars or
/// fewer.
fn char_index(s: &str, n: usize) -> Option<usize> {
  s.char_indices().nth(n).map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
  use super::*;

  const ABC: &str = "abc";
  const DUMMY: &str = "dummy";

  #[test]
  fn empty_and_length() {
    assert!(is_empty(EMPTY));
    assert!(is_empty(None));
    assert!(!is_empty(DUMMY));
    assert!(!is_empty("   "));

    assert_eq!(length(EMPTY), 0);
    assert_eq!(length(None), 0);
    assert_eq!(length("   "), 3);
    assert_eq!(length("héllo"), 5);
  }

  #[test]
  fn blank() {
    assert!(is_blank(EMPTY));
    assert!(is_blank("   "));
    assert!(is_blank("    \t"));
    assert!(is_blank("    \n  "));
    assert!(is_blank(None));

    assert!(!is_blank(DUMMY));
    assert!(!is_blank("   a   "));
  }

  #[test]
  fn case_conversion() {
    assert_eq!(to_upper_case(None), None);
    assert_eq!(to_upper_case("a1b2").as_deref(), Some("A1B2"));
    assert_eq!(to_lower_case(None), None);
    assert_eq!(to_lower_case("C1t2").as_deref(), Some("c1t2"));
  }

  #[test]
  fn truncate_keeps_short_input() {
    assert_eq!(truncate_with_marker(ABC, 4), ABC);
    assert_eq!(truncate_with_marker(ABC, 3), ABC);
    assert_eq!(truncate_with_marker("123", 4), "123");
    assert!(matches!(truncate_with_marker(ABC, 3), Cow::Borrowed(_)));
  }

  #[test]
  fn truncate_without_room_for_marker() {
    assert_eq!(truncate_with_marker("ab", 1), "a");
    assert_eq!(truncate_with_marker(ABC, 2), "ab");
    assert_eq!(truncate_with_marker("123", 2), "12");
    assert_eq!(truncate_with_marker(ABC, 0), "");
  }

  #[test]
  fn truncate_with_room_for_marker() {
    assert_eq!(truncate_with_marker("abcdef", 4), "ab..");
    assert_eq!(truncate_with_marker("1234567890", 9), "1234567..");
    assert_eq!(truncate_with_marker("abcd", 3), "a..");
  }

  #[test]
  fn truncate_blank_is_untouched() {
    assert_eq!(truncate_with_marker("       ", 2), "       ");
    assert_eq!(truncate_with_marker(EMPTY, 0), EMPTY);
    assert_eq!(None::<&str>.map(|s| truncate_with_marker(s, 4)), None);
  }

  #[test]
  fn truncate_multibyte() {
    assert_eq!(truncate_with_marker("ééééé", 4), "éé..");
    assert_eq!(truncate_with_marker("日本語テキスト", 2), "日本");
  }

  #[test]
  fn left_padding() {
    assert_eq!(left_pad("123", 5, '0'), "00123");
    assert_eq!(left_pad(EMPTY, 4, '*'), "****");
    assert_eq!(left_pad(EMPTY, 0, '*'), EMPTY);
    assert_eq!(left_pad(DUMMY, 0, '*'), DUMMY);
    assert_eq!(left_pad(DUMMY, DUMMY.len() - 1, '*'), DUMMY);
    assert_eq!(left_pad(ABC, 3, '*'), ABC);
    assert_eq!(None::<&str>.map(|s| left_pad(s, 10, '*')), None);
  }

  #[test]
  fn right_padding() {
    assert_eq!(right_pad("123", 5, '0'), "12300");
    assert_eq!(right_pad("abc", 6, '-'), "abc---");
    assert_eq!(right_pad(EMPTY, 4, '*'), "****");
    assert_eq!(right_pad(EMPTY, 0, '*'), EMPTY);
    assert_eq!(right_pad(DUMMY, DUMMY.len() - 1, '*'), DUMMY);
    assert_eq!(right_pad(ABC, 3, '*'), ABC);
  }

  #[test]
  fn padding_counts_chars() {
    assert_eq!(left_pad("é", 3, '·'), "··é");
    assert_eq!(Padding::Right.concat("a", "--"), "a--");
    assert_eq!(Padding::Left.concat("a", "--"), "--a");
  }

  #[test]
  fn concatenation() {
    let value = "my value";
    assert_eq!(concat_with::<&str>(value, ' ', &[]), value);
    assert_eq!(concat_with(value, ' ', &["x", "y", "z"]), "my value x y z");

    assert_eq!(join::<&str>(' ', &[]), EMPTY);
    assert_eq!(join(' ', &["x", "y", "z"]), "x y z");

    assert_eq!(prepend("value", &[]), vec!["value"]);
    assert_eq!(
      prepend("value", &["a", "b", "c", "d"]),
      vec!["value", "a", "b", "c", "d"]
    );
  }

  #[test]
  fn digits() {
    assert!(only_digits("1234", 4));
    assert!(only_digits("12345", 5));
    assert!(only_digits(EMPTY, 0));
    assert!(only_digits("١٢٣", 3));

    assert!(!only_digits("1234", 5));
    assert!(!only_digits("12345", 4));
    assert!(!only_digits("1234a", 5));
    assert!(!only_digits("test", 4));
    assert!(!only_digits(None, 0));
  }

  #[test]
  fn constants() {
    assert!(EMPTY.is_empty());
    assert_eq!(TRUNCATION_MARKER, "..");
    assert!(NEW_LINE.ends_with('\n'));
  }

  quickcheck::quickcheck! {
    fn truncation_fits(input: String, max_len: u8) -> bool {
      let max_len = usize::from(max_len);
      let out = truncate_with_marker(&input, max_len);
      let len = input.chars().count();

      if is_blank(input.as_str()) || len <= max_len {
        out == input
      } else if max_len <= TRUNCATION_MARKER_LEN {
        out.chars().count() == max_len && input.starts_with(&*out)
      } else {
        out.chars().count() == max_len && out.ends_with(TRUNCATION_MARKER)
      }
    }

    fn padded_length(input: String, size: u8, right: bool) -> bool {
      let size = usize::from(size);
      let side = if right { Padding::Right } else { Padding::Left };
      let out = pad(&input, size, '#', side);
      out.chars().count() == input.chars().count().max(size) && out.contains(input.as_str())
    }
  }
}
