//! Info command - describe the database.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use sensordb_store::{SCHEMA_VERSION, Store};
use sensordb_types::TimeRange;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Execute the info command.
pub fn cmd_info<W: Write>(store: &Store, out: &mut W, path: &Path) -> Result<()> {
    let tags = store.tags()?;

    writeln!(out, "Database:       {}", path.display())?;
    writeln!(
        out,
        "Schema version: {} (supported: {})",
        store.schema_version()?,
        SCHEMA_VERSION
    )?;

    if tags.is_empty() {
        writeln!(out, "No readings stored.")?;
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["Tag", "Readings"]);
    for tag in &tags {
        let count = store.count_scalar_readings(tag, &TimeRange::all(), None)?;
        builder.push_record([tag.clone(), count.to_string()]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    writeln!(out, "{table}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_lists_tags_with_counts() {
        let store = Store::open_in_memory().unwrap();
        store.add_scalar_reading("temp", 0, 1, 1.0).unwrap();
        store.add_scalar_reading("temp", 1, 1, 1.0).unwrap();
        store.add_scalar_reading("co2", 0, 1, 400.0).unwrap();

        let mut out = Vec::new();
        cmd_info(&store, &mut out, Path::new(":memory:")).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Database:       :memory:"));
        assert!(text.contains(&format!("Schema version: {SCHEMA_VERSION}")));
        let co2 = text.find("co2").unwrap();
        let temp = text.find("temp").unwrap();
        assert!(co2 < temp);
        assert!(text.contains("Tag"));
        assert!(text.contains("Readings"));
        let row = |tag: &str| {
            text.lines()
                .find(|l| l.split('│').any(|cell| cell.trim() == tag))
                .map(|l| l.split('│').map(str::trim).collect::<Vec<_>>())
                .unwrap()
        };
        assert!(row("temp").contains(&"2"));
        assert!(row("co2").contains(&"1"));
    }

    #[test]
    fn test_info_empty_store() {
        let store = Store::open_in_memory().unwrap();
        let mut out = Vec::new();
        cmd_info(&store, &mut out, Path::new("x.db")).unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("No readings stored.\n"));
    }
}
