//! Delete command - remove readings of a tag in a time range.

use std::io::Write;

use anyhow::{Context, Result};
use sensordb_store::Store;
use sensordb_types::TimeRange;

/// Execute the delete command.
pub fn cmd_delete<W: Write>(store: &Store, out: &mut W, tag: &str, range: &TimeRange) -> Result<()> {
    let deleted = store
        .delete_scalar_readings(tag, range)
        .with_context(|| format!("Failed to delete readings for {tag}"))?;

    writeln!(out, "Deleted {deleted} readings for {tag} in {range}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_reports_count() {
        let store = Store::open_in_memory().unwrap();
        store.add_scalar_reading("temp", 0, 1, 1.0).unwrap();
        store.add_scalar_reading("temp", 2, 2, 1.0).unwrap();
        store.add_scalar_reading("temp", 0, 9, 1.0).unwrap();

        let mut out = Vec::new();
        cmd_delete(&store, &mut out, "temp", &"[1,2]".parse::<TimeRange>().unwrap()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Deleted 2 readings for temp in [1,2]\n"
        );
        assert_eq!(
            store
                .count_scalar_readings("temp", &TimeRange::all(), None)
                .unwrap(),
            1
        );
    }
}
