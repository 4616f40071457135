//! Shared error type for the core crate.

/// Errors arising while loading or parsing the wizard data source.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The data source could not be read from disk.
    #[error("failed to read data source: {0}")]
    Io(#[from] std::io::Error),

    /// The data source is not a valid JSON array of records.
    #[error("failed to parse data source: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
