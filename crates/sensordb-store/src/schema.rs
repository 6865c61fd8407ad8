//! Database schema and migrations.
//!
//! The schema version lives in SQLite's `user_version` header field, so a
//! version bump commits or rolls back together with the DDL of its step.
//! Every step takes the write lock up front and re-reads the version under
//! it, so connections opening the same file at once never repeat a step.

use rusqlite::{Connection, TransactionBehavior};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 3;

/// Name of the readings table.
pub(crate) const TABLE: &str = "scalar_sensors";

/// Column names of the readings table.
pub(crate) mod column {
    pub const TAG: &str = "tag";
    pub const TIMESTAMP_MILLIS: &str = "timestampMillis";
    pub const VALUE: &str = "value";
    pub const RESOLUTION_TIER: &str = "resolutionTier";
}

/// Name of the index over `timestampMillis`.
pub(crate) const TIMESTAMP_INDEX: &str = "timestamp";

/// One upgrade step, taking the schema from `from` to `from + 1`.
struct Migration {
    from: i32,
    description: &'static str,
    apply: fn(&Connection) -> rusqlite::Result<()>,
}

/// Upgrade steps in version order.
const MIGRATIONS: &[Migration] = &[
    Migration {
        from: 1,
        description: "add timestamp index",
        apply: create_timestamp_index,
    },
    Migration {
        from: 2,
        description: "add resolution tier column",
        apply: add_resolution_tier_column,
    },
];

/// Initialize the database schema.
///
/// Creates the current schema on a fresh database and upgrades older
/// databases one step at a time. Databases from a newer release are left
/// untouched.
pub fn initialize(conn: &mut Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version > SCHEMA_VERSION {
        warn!(
            "Database schema version {} is newer than supported version {}; opening without migration",
            version, SCHEMA_VERSION
        );
        return Ok(());
    }
    if version == SCHEMA_VERSION {
        return Ok(());
    }
    if version == 0 && create_if_fresh(conn)? {
        return Ok(());
    }

    migrate(conn, MIGRATIONS)
}

/// Create the current schema if the database is still at version 0.
///
/// Returns `false` when another connection got there first.
fn create_if_fresh(conn: &mut Connection) -> Result<bool> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    if get_schema_version(&tx)? != 0 {
        return Ok(false);
    }

    create_schema(&tx)?;
    set_schema_version(&tx, SCHEMA_VERSION)?;
    tx.commit()?;
    info!("Created schema version {}", SCHEMA_VERSION);
    Ok(true)
}

/// Get the current schema version (0 for a fresh database).
pub(crate) fn get_schema_version(conn: &Connection) -> Result<i32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> rusqlite::Result<()> {
    conn.pragma_update(None, "user_version", version)
}

/// Create the full current schema.
fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(&format!(
        "CREATE TABLE {TABLE} (
            {tag} TEXT,
            {ts} INTEGER,
            {value} REAL,
            {tier} INTEGER DEFAULT 0
        );",
        tag = column::TAG,
        ts = column::TIMESTAMP_MILLIS,
        value = column::VALUE,
        tier = column::RESOLUTION_TIER,
    ))?;
    create_timestamp_index(conn)
}

/// v1 -> v2: tables created at v1 lacked the timestamp index.
fn create_timestamp_index(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(&format!(
        "CREATE INDEX {TIMESTAMP_INDEX} ON {TABLE} ({});",
        column::TIMESTAMP_MILLIS
    ))
}

/// v2 -> v3: existing rows become raw (tier 0) readings.
fn add_resolution_tier_column(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(&format!(
        "ALTER TABLE {TABLE} ADD COLUMN {} INTEGER DEFAULT 0;",
        column::RESOLUTION_TIER
    ))
}

/// Run migrations up to [`SCHEMA_VERSION`].
///
/// Each step runs in its own immediate transaction together with its
/// version bump. The stored version is read inside that transaction, so a
/// step already applied by another connection is skipped.
fn migrate(conn: &mut Connection, steps: &[Migration]) -> Result<()> {
    let mut version = get_schema_version(conn)?;

    loop {
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(step_failed(version))?;
        version = get_schema_version(&tx)?;
        if version >= SCHEMA_VERSION {
            return Ok(());
        }

        let step = steps
            .iter()
            .find(|step| step.from == version)
            .ok_or(Error::Migration {
                from: version,
                to: version + 1,
                source: None,
            })?;

        info!(
            "Migrating schema from version {} to {}: {}",
            version,
            version + 1,
            step.description
        );

        let applied = (step.apply)(&tx).and_then(|()| set_schema_version(&tx, version + 1));
        applied
            .and_then(|()| tx.commit())
            .map_err(step_failed(version))?;
    }
}

/// Wrap a storage error raised while moving from version `from`.
fn step_failed(from: i32) -> impl FnOnce(rusqlite::Error) -> Error {
    move |source| Error::Migration {
        from,
        to: from + 1,
        source: Some(source),
    }
}
