//! Best-effort filesystem helpers.
//!
//! Directory creation and file removal report failure as `false` (and a log
//! line) rather than an error, so a caller can treat them as idempotent checks.

use std::{
  fs,
  io::ErrorKind,
  path::Path,
};

use eyre::{
  Result,
  WrapErr,
};

/// The Unix path separator.
pub const UNIX_SEPARATOR: char = '/';

const WINDOWS_SEPARATOR: char = '\\';

/// Reads the file at `path` and splits it into lines.
///
/// Lines end at `\n` or `\r\n`; the terminator is not part of the line and a
/// trailing terminator does not produce an empty last line.
pub fn read_all_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
  let path = path.as_ref();
  let content =
    fs::read_to_string(path).wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
  Ok(content.lines().map(String::from).collect())
}

/// Makes sure a directory exists at `path`, creating any missing parents.
///
/// Returns whether the directory exists once the call returns.
pub fn ensure_dir_exists(path: impl AsRef<Path>) -> bool {
  let path = path.as_ref();
  if path.is_dir() {
    return true;
  }

  match fs::create_dir_all(path) {
    Ok(()) => {
      log::info!("Directory {} created", path.display());
      path.is_dir()
    },
    Err(err) => {
      log::error!("The directory {} can't be created: {err}", path.display());
      false
    },
  }
}

/// Deletes the file at `path`.
///
/// Returns `true` only if a file was actually removed.
pub fn delete_file(path: impl AsRef<Path>) -> bool {
  let path = path.as_ref();
  match fs::remove_file(path) {
    Ok(()) => {
      log::info!("File {} deleted", path.display());
      true
    },
    Err(err) if err.kind() == ErrorKind::NotFound => {
      log::warn!("File {} doesn't exist", path.display());
      false
    },
    Err(err) => {
      log::error!("Error while deleting file {}: {err}", path.display());
      false
    },
  }
}

/// Returns the byte index of the last `/` or `\` in `path`.
pub fn index_of_last_separator(path: &str) -> Option<usize> {
  path.rfind([UNIX_SEPARATOR, WINDOWS_SEPARATOR])
}

/// Returns the part of `path` after the last directory separator.
///
/// Both Unix and Windows separators are recognised, whatever the host.
pub fn file_name(path: &str) -> &str {
  match index_of_last_separator(path) {
    Some(idx) => &path[idx + 1..],
    None => path,
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn reads_lines() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, "line1\nline2\r\nline3\n").unwrap();

    let lines = read_all_lines(&file).unwrap();
    assert_eq!(lines, ["line1", "line2", "line3"]);
  }

  #[test]
  fn reading_missing_file_names_the_path() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("missing.txt");

    let err = read_all_lines(&file).unwrap_err();
    assert!(err.to_string().contains("missing.txt"));
    let io = err
      .downcast_ref::<std::io::Error>()
      .expect("io error is the root cause");
    assert_eq!(io.kind(), ErrorKind::NotFound);
  }

  #[test]
  fn creates_nested_directories() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    assert!(!nested.exists());

    assert!(ensure_dir_exists(&nested));
    assert!(nested.is_dir());
    // already there
    assert!(ensure_dir_exists(&nested));
    assert!(ensure_dir_exists(dir.path()));
  }

  #[test]
  fn cannot_create_directory_under_a_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, "").unwrap();

    assert!(!ensure_dir_exists(file.join("folder")));
    assert!(!ensure_dir_exists(&file));
  }

  #[test]
  fn deletes_existing_file_only() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, "data").unwrap();

    assert!(delete_file(&file));
    assert!(!file.exists());
    assert!(!delete_file(&file));
  }

  #[test]
  fn file_names() {
    assert_eq!(file_name("/tmp/data/file1.txt"), "file1.txt");
    assert_eq!(file_name(r"C:\tmp\data\other\sample.csv"), "sample.csv");
    assert_eq!(file_name("plain.txt"), "plain.txt");
    assert_eq!(file_name("dir/"), "");
  }

  #[test]
  fn last_separator() {
    assert_eq!(index_of_last_separator("/tmp/my-dir/my-file.txt"), Some(11));
    assert_eq!(index_of_last_separator(r"C:\tmp\my-dir\my-file.txt"), Some(13));
    assert_eq!(index_of_last_separator("mixed\\dir/file"), Some(9));
    assert_eq!(index_of_last_separator("file"), None);
  }
}
