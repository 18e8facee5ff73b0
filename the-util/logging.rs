//! Leveled logging through the [`log`] facade.
//!
//! These helpers pick the severity at runtime, which the `log::info!` family of
//! macros cannot do.

use std::fmt;

use log::{
  Level,
  Log,
  Record,
};

/// Sends a message at `level` to the given logger.
///
/// The record is only built and dispatched when the logger has `level`
/// enabled for `target`.
pub fn log_to(logger: &dyn Log, level: Level, target: &str, args: fmt::Arguments<'_>) {
  let metadata = log::Metadata::builder()
    .level(level)
    .target(target)
    .build();
  if !logger.enabled(&metadata) {
    return;
  }

  logger.log(
    &Record::builder()
      .metadata(metadata)
      .args(args)
      .build(),
  );
}

/// Sends a message at `level` to the global logger.
pub fn log_at(level: Level, target: &str, args: fmt::Arguments<'_>) {
  if level <= log::max_level() {
    log_to(log::logger(), level, target, args);
  }
}
