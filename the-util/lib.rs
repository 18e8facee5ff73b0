//! Small, dependency-light primitives shared across the workspace: null-aware
//! ordering, iterator chunking, error cause chains, text padding, stream
//! copying and a handful of best-effort filesystem and parsing helpers.

pub mod cmp;
pub mod collections;
pub mod error;
pub mod fs;
pub mod io;
pub mod logging;
pub mod number;
pub mod string;
pub mod sync;
pub mod time;
