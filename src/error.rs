//! Error types for degrees.

use std::path::PathBuf;

use thiserror::Error;

use crate::catalogue::PersonId;

/// Underflow on a frontier. The search engine checks `is_empty` before every
/// removal, so this never escapes a search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrontierError {
    #[error("frontier is empty")]
    Empty,
}

#[derive(Error, Debug)]
pub enum DegreesError {
    /// Source or target id is not in the catalogue.
    #[error("unknown person id: {0}")]
    UnknownPerson(PersonId),

    #[error(transparent)]
    Frontier(#[from] FrontierError),

    /// Parent links loop back on themselves. This is an internal fault.
    #[error("malformed parent chain at search node {node}")]
    MalformedChain { node: usize },

    /// The caller's cancellation check fired.
    #[error("search cancelled after exploring {explored} people")]
    Cancelled { explored: usize },

    #[error("search explored more than {limit} people")]
    LimitExceeded { limit: usize },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No person carries the given name.
    #[error("person not found: {0}")]
    PersonNotFound(String),
}

pub type Result<T> = std::result::Result<T, DegreesError>;
