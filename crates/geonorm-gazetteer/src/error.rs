//! Gazetteer loading errors. All of these are fatal: the run cannot
//! proceed without reference data.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GazetteerError {
    #[error("failed to read gazetteer {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("gazetteer {path:?} record {record}: {message}")]
    Malformed {
        path: PathBuf,
        record: usize,
        message: String,
    },
    #[error("gazetteer {path:?} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },
    #[error("gazetteer {path:?} contains no entries")]
    Empty { path: PathBuf },
}
