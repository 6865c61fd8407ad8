//! Output formatting for query results.

use std::io::Write;

use anyhow::Result;
use sensordb_store::ScalarReadingList;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;
use crate::util::format_timestamp;

/// Write `readings` to `out` in the requested format.
pub fn write_readings<W: Write>(
    out: &mut W,
    tag: &str,
    readings: &ScalarReadingList,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => out.write_all(format_readings_text(tag, readings).as_bytes())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, readings)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => readings.write_csv(&mut *out)?,
    }
    Ok(())
}

/// Human-readable table, one reading per row.
#[must_use]
pub fn format_readings_text(tag: &str, readings: &ScalarReadingList) -> String {
    if readings.is_empty() {
        return format!("No readings for {tag}\n");
    }

    let mut output = format!("{} readings for {}\n", readings.len(), tag);

    let mut builder = Builder::default();
    builder.push_record(["Time", "Millis", "Value"]);
    for point in readings {
        builder.push_record([
            format_timestamp(point.timestamp_millis),
            point.timestamp_millis.to_string(),
            point.value.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    output.push_str(&table.to_string());
    output.push('\n');
    output
}
