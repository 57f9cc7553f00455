//! Crate-wide error types.
//!
//! Each concern gets its own `thiserror` enum; binaries compose these with
//! `anyhow::Context` at the boundary instead of threading a single
//! kitchen-sink error type through the library.

use thiserror::Error;

/// Failure decoding or resizing a source image (C1, Image Preprocessor).
#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image produced an empty pixel buffer after resize")]
    EmptyBuffer,
}

/// Malformed fingerprint text (wrong word count, non-numeric word).
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("fingerprint word {index} is not a valid u64: {value:?}")]
    InvalidWord { index: usize, value: String },

    #[error("fingerprint has {found} words, expected {expected}")]
    WordCountMismatch { found: usize, expected: usize },

    #[error("malformed hash line, expected \"<fingerprint>\\t<path>\": {0:?}")]
    MalformedLine(String),
}

/// Persistence boundary failures (SQLite open/read/write).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to open store: {0}")]
    Open(#[source] rusqlite::Error),

    #[error("failed to read from store: {0}")]
    Read(#[source] rusqlite::Error),

    #[error("failed to write to store: {0}")]
    Write(#[source] rusqlite::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Bad CLI arguments that `clap` itself can't express as a type constraint.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("threshold must be >= 1, got {0}")]
    InvalidThreshold(i64),

    #[error("threads must be >= 1, got {0}")]
    InvalidThreads(i64),

    #[error("unknown data type {0:?}, expected \"hashes\" or \"clusters\"")]
    InvalidDataType(String),

    #[error("clusters export requires a table name")]
    MissingClustersTable,
}
