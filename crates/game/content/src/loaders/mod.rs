//! Content loaders for reading game data from files.
//!
//! Loaders convert RON/TOML files into the records and tables the engine
//! consumes. Syntax and I/O problems are hard errors here; semantic gaps
//! inside a record are handled by the adapter's defaulting instead.

pub mod encounters;
pub mod tables;

pub use encounters::EncounterSetLoader;
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
