//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "geonorm",
    version,
    about = "Normalize an annotated table into canonical geo-resolved long format",
    long_about = "Resolve each row of a CSV table to the canonical administrative\n\
                  hierarchy using a declarative mapper document and a reference\n\
                  gazetteer, then reshape it into long format split by value kind."
)]
pub struct Cli {
    /// Input CSV table.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Mapper document (JSON) annotating the input columns.
    #[arg(long = "mapper", value_name = "PATH")]
    pub mapper: PathBuf,

    /// Reference gazetteer (CSV).
    #[arg(long = "gazetteer", value_name = "PATH")]
    pub gazetteer: PathBuf,

    /// Output prefix; writes <PREFIX>.csv and, when the string stream
    /// is non-empty, <PREFIX>_str.csv.
    #[arg(long = "output", value_name = "PREFIX", default_value = "out")]
    pub output: PathBuf,

    /// Reject fuzzy place-name matches beyond this edit distance
    /// (default: accept the nearest candidate unconditionally).
    #[arg(long = "max-distance", value_name = "N")]
    pub max_distance: Option<usize>,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}
