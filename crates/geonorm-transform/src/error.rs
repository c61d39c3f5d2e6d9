use polars::prelude::PolarsError;
use thiserror::Error;

/// Failures while assembling output frames. Per-record parse problems
/// are not errors; they degrade to nulls in the record itself.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to build output frame: {0}")]
    Frame(#[from] PolarsError),
}
