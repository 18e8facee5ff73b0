//! Byte stream helpers.

use std::io::{
  self,
  Cursor,
  ErrorKind,
  Read,
  Write,
};

use encoding_rs::{
  Encoding,
  UTF_8,
};

/// Buffer size used by [`copy`].
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Copies every byte from `reader` to `writer`, returning the number of bytes
/// copied.
pub fn copy<R, W>(reader: &mut R, writer: &mut W) -> io::Result<u64>
where
  R: Read + ?Sized,
  W: Write + ?Sized,
{
  copy_with_buffer_size(reader, writer, DEFAULT_BUFFER_SIZE)
}

/// Like [`copy`] with an intermediate buffer of `buffer_size` bytes.
///
/// # Panics
///
/// Panics if `buffer_size` is zero.
pub fn copy_with_buffer_size<R, W>(
  reader: &mut R,
  writer: &mut W,
  buffer_size: usize,
) -> io::Result<u64>
where
  R: Read + ?Sized,
  W: Write + ?Sized,
{
  copy_with_buffer(reader, writer, &mut vec![0; buffer_size])
}

/// Copies every byte from `reader` to `writer` through the caller's `buffer`.
///
/// Each read is forwarded to the writer as-is; the first read or write error
/// aborts the copy. The one exception is a read failing with
/// [`ErrorKind::Interrupted`], which is retried as the [`Read`] contract asks.
/// Nothing else is retried.
///
/// # Panics
///
/// Panics if `buffer` is empty, since no progress could ever be made.
pub fn copy_with_buffer<R, W>(reader: &mut R, writer: &mut W, buffer: &mut [u8]) -> io::Result<u64>
where
  R: Read + ?Sized,
  W: Write + ?Sized,
{
  assert!(!buffer.is_empty(), "copy buffer must not be empty");

  let mut count = 0u64;
  loop {
    let n = match reader.read(buffer) {
      Ok(0) => return Ok(count),
      Ok(n) => n,
      Err(err) if err.kind() == ErrorKind::Interrupted => continue,
      Err(err) => return Err(err),
    };
    writer.write_all(&buffer[..n])?;
    count += n as u64;
  }
}

/// Returns an in-memory reader over `input` encoded with `encoding`, or UTF-8
/// if none is given.
pub fn to_reader(input: &str, encoding: Option<&'static Encoding>) -> Cursor<Vec<u8>> {
  let (bytes, _, _) = encoding.unwrap_or(UTF_8).encode(input);
  Cursor::new(bytes.into_owned())
}
