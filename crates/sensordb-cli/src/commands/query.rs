//! Query command - read readings of a tag.

use std::io::Write;

use anyhow::{Context, Result};
use sensordb_store::Store;
use sensordb_types::TimeRange;

use crate::cli::OutputFormat;
use crate::format::write_readings;

/// Arguments for the query command.
#[derive(Debug, Clone)]
pub struct QueryArgs {
    pub tag: String,
    pub range: TimeRange,
    pub tier: Option<i32>,
    pub limit: i64,
    pub newest_first: bool,
    pub format: OutputFormat,
}

/// Execute the query command.
pub fn cmd_query<W: Write>(store: &Store, out: &mut W, args: &QueryArgs) -> Result<()> {
    let range = if args.newest_first {
        args.range.newest_first()
    } else {
        args.range
    };

    let readings = store
        .get_scalar_readings(&args.tag, &range, args.tier, args.limit)
        .with_context(|| format!("Failed to query readings for {}", args.tag))?;

    write_readings(out, &args.tag, &readings, args.format)
}
