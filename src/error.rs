use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while aligning path borders.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AlignError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document is not well-formed: {0}")]
    Document(String),

    #[error("malformed path data in path #{index}: {message}")]
    MalformedPath { index: usize, message: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AlignError {
    pub(crate) fn malformed(index: usize, message: impl Into<String>) -> Self {
        AlignError::MalformedPath {
            index,
            message: message.into(),
        }
    }
}

impl From<roxmltree::Error> for AlignError {
    fn from(err: roxmltree::Error) -> Self {
        AlignError::Document(err.to_string())
    }
}

/// Input that leaves nothing to align. Never fatal: the run completes
/// and the document is written unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degenerate {
    /// Fewer than two vertices across all paths.
    TooFewVertices(usize),
    /// All vertices belong to a single path.
    SinglePath,
}

impl fmt::Display for Degenerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degenerate::TooFewVertices(n) => write!(f, "only {n} vertex(es), nothing to align"),
            Degenerate::SinglePath => f.write_str("all vertices lie on a single path"),
        }
    }
}
