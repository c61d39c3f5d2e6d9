//! Pipeline orchestration: schema + table + gazetteer in, canonical
//! long-format streams out.

pub mod pipeline;
pub mod report;

pub use pipeline::{Normalized, normalize};
pub use report::RunReport;
