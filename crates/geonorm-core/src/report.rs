use std::fmt;

/// Run-level accounting for one normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Input rows processed.
    pub rows: usize,
    /// Records emitted to the numeric stream.
    pub numeric_records: usize,
    /// Records emitted to the string stream.
    pub text_records: usize,
    /// Rows whose geo never resolved at any level. Still emitted.
    pub unresolved_rows: usize,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows -> {} numeric + {} string records ({} rows with unresolved geo)",
            self.rows, self.numeric_records, self.text_records, self.unresolved_rows
        )
    }
}
