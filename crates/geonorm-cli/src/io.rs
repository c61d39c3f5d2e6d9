//! File adapters: CSV table input and CSV frame output.
//!
//! Deliberately plain; the pipeline itself is format-agnostic and the
//! physical serialization of outputs is not part of its contract.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use geonorm_model::Table;

/// Read a CSV file into an in-memory table of strings.
pub fn read_table(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open input table {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read headers from {}", path.display()))?
        .iter()
        .map(String::from)
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("failed to read row from {}", path.display()))?;
        rows.push(record.iter().map(String::from).collect());
    }
    Ok(Table::new(headers, rows))
}

/// `<prefix>.csv` for the numeric stream.
pub fn numeric_path(prefix: &Path) -> PathBuf {
    prefix.with_extension("csv")
}

/// `<prefix>_str.csv` for the string stream.
pub fn text_path(prefix: &Path) -> PathBuf {
    let mut name = prefix
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    name.push_str("_str");
    prefix.with_file_name(name).with_extension("csv")
}

/// Write one output frame as CSV.
pub fn write_frame(frame: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(frame)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_csv_into_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a,b").unwrap();
        writeln!(file, "1,2").unwrap();
        writeln!(file, "3,4").unwrap();
        let table = read_table(file.path()).unwrap();
        assert_eq!(table.headers, ["a", "b"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.value(1, 1), "4");
    }

    #[test]
    fn output_paths_derive_from_prefix() {
        let prefix = PathBuf::from("results/run1");
        assert_eq!(numeric_path(&prefix), PathBuf::from("results/run1.csv"));
        assert_eq!(text_path(&prefix), PathBuf::from("results/run1_str.csv"));
    }
}
