//! Local persistence for scalar sensor readings.
//!
//! This crate provides SQLite-based storage for `(tag, timestamp, value)`
//! readings, each recorded at a resolution tier (0 for raw data, higher
//! tiers for decimated views of the same stream).
//!
//! # Features
//!
//! - Append readings one at a time or in batches
//! - Range queries by tag, time interval and tier, oldest or newest first,
//!   with an optional row limit
//! - Range deletes across all tiers of a tag
//! - Lookup of the first tag recorded after a timestamp
//! - Versioned schema with step-by-step migrations from older files
//!
//! # Example
//!
//! ```no_run
//! use sensordb_store::Store;
//! use sensordb_types::TimeRange;
//!
//! let store = Store::open_default()?;
//! store.add_scalar_reading("temperature", 0, 1_700_000_000_000, 21.5)?;
//!
//! // Ten most recent raw readings
//! let range = TimeRange::all().newest_first();
//! let readings = store.get_scalar_readings("temperature", &range, Some(0), 10)?;
//! for point in &readings {
//!     println!("{} {}", point.timestamp_millis, point.value);
//! }
//! # Ok::<(), sensordb_store::Error>(())
//! ```

mod error;
mod models;
mod queries;
mod schema;
mod store;

pub use error::{Error, Result};
pub use models::ScalarReadingList;
pub use queries::{ScalarQuery, Selection};
pub use schema::SCHEMA_VERSION;
pub use store::{Store, StoreOptions};

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/sensordb/readings.db`
/// - macOS: `~/Library/Application Support/sensordb/readings.db`
/// - Windows: `C:\Users\<user>\AppData\Local\sensordb\readings.db`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("sensordb")
        .join("readings.db")
}
