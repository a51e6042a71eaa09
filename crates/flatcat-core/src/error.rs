use std::io;

use thiserror::Error;

/// Canonical result for every flatcat crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Malformed table description '{path}': {message}")]
    Descriptor { path: String, message: String },

    #[error("{op} failed for '{target}': {source}")]
    Transport {
        op: &'static str,
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("{schema}.{table}: expected field {index} to be {expected} but it is {actual}")]
    TypeMismatch {
        schema: String,
        table: String,
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{schema}.{table}: cannot parse field {index}: {message}")]
    RowParse {
        schema: String,
        table: String,
        index: usize,
        message: String,
    },

    #[error("{schema}.{table}: field {index} is null")]
    NullField {
        schema: String,
        table: String,
        index: usize,
    },

    #[error("{schema}.{table}: invalid field index {index} (row has {width} columns)")]
    FieldIndex {
        schema: String,
        table: String,
        index: usize,
        width: usize,
    },

    #[error("cursor state: {0}")]
    State(String),

    #[error("Schema error: {0}")]
    Schema(String),
}

impl Error {
    /// Wrap an I/O failure raised while talking to a storage backend.
    pub fn transport(op: &'static str, target: impl Into<String>, source: io::Error) -> Self {
        Error::Transport {
            op,
            target: target.into(),
            source,
        }
    }

    /// True when the error is a transport failure for a path that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Transport { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Config(e.to_string())
    }
}
