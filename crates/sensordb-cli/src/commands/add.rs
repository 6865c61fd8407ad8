//! Add command - append one reading.

use anyhow::{Context, Result};
use sensordb_store::Store;
use tracing::info;

use crate::util::parse_timestamp;

/// Execute the add command.
pub fn cmd_add(store: &Store, tag: &str, timestamp: &str, value: f64, tier: i32) -> Result<()> {
    let timestamp_millis = parse_timestamp(timestamp)?;

    store
        .add_scalar_reading(tag, tier, timestamp_millis, value)
        .context("Failed to store reading")?;

    info!(
        "Stored {} = {} at {} (tier {})",
        tag, value, timestamp_millis, tier
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensordb_types::TimeRange;

    #[test]
    fn test_add_parses_rfc3339() {
        let store = Store::open_in_memory().unwrap();
        cmd_add(&store, "temp", "1970-01-01T00:00:02Z", 1.5, 1).unwrap();

        let list = store
            .get_scalar_readings("temp", &TimeRange::all(), Some(1), 0)
            .unwrap();
        assert_eq!(list.as_pairs(), vec![(2000, 1.5)]);
    }

    #[test]
    fn test_add_rejects_bad_timestamp() {
        let store = Store::open_in_memory().unwrap();
        assert!(cmd_add(&store, "temp", "soon", 1.0, 0).is_err());
        assert!(store.tags().unwrap().is_empty());
    }
}
