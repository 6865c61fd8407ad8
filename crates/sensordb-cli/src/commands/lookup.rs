//! First-after command - find the tag recorded next after a timestamp.

use std::io::Write;

use anyhow::{Context, Result};
use sensordb_store::Store;

use crate::util::parse_timestamp;

/// Execute the first-after command.
pub fn cmd_first_after<W: Write>(store: &Store, out: &mut W, timestamp: &str) -> Result<()> {
    let timestamp_millis = parse_timestamp(timestamp)?;

    match store
        .get_first_tag_after(timestamp_millis)
        .context("Failed to look up readings")?
    {
        Some(tag) => writeln!(out, "{tag}")?,
        None => writeln!(out, "No readings after {timestamp_millis}")?,
    }
    Ok(())
}
