//! The single `normalize` run: load inputs, resolve, write outputs.

use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use geonorm_core::{RunReport, normalize};
use geonorm_gazetteer::{Gazetteer, ResolverOptions};
use geonorm_map::interpret;

use crate::cli::Cli;
use crate::io::{numeric_path, read_table, text_path, write_frame};

pub fn run(cli: &Cli) -> Result<RunReport> {
    let table = read_table(&cli.input)?;
    let raw_mapper = fs::read_to_string(&cli.mapper)
        .with_context(|| format!("failed to read mapper document {}", cli.mapper.display()))?;
    let schema = interpret(&raw_mapper, &table.headers)
        .with_context(|| format!("invalid mapper document {}", cli.mapper.display()))?;
    let gazetteer = Gazetteer::load(&cli.gazetteer)?;
    let options = ResolverOptions {
        max_distance: cli.max_distance,
    };

    let result = normalize(&table, &schema, &gazetteer, &options)?;

    let numeric = numeric_path(&cli.output);
    write_frame(&mut result.numeric_frame()?, &numeric)?;
    info!(path = %numeric.display(), records = result.report.numeric_records, "wrote numeric stream");

    // string stream file only appears when there is something to put in it
    if !result.text.is_empty() {
        let text = text_path(&cli.output);
        write_frame(&mut result.text_frame()?, &text)?;
        info!(path = %text.display(), records = result.report.text_records, "wrote string stream");
    }

    Ok(result.report)
}
