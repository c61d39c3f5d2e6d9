//! Record-level normalization: coordinates, timestamps, and the
//! wide-to-long reshape into canonical records and output frames.

pub mod coords;
pub mod datetime;
pub mod error;
pub mod frames;
pub mod long_format;

pub use coords::{parse_coordinate, parse_lat_lon_pair};
pub use datetime::parse_timestamp_ms;
pub use error::TransformError;
pub use frames::records_to_frame;
pub use long_format::{RecordStreams, expand};
