//! Main store implementation.

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use tracing::{debug, info};

use sensordb_types::{ScalarPoint, TimeRange};

use crate::error::{Error, Result};
use crate::models::ScalarReadingList;
use crate::queries::{ScalarQuery, Selection};
use crate::schema::{self, TABLE, column};

/// Options applied when opening a database file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// How long a statement waits on a lock held by another connection
    /// before failing with `SQLITE_BUSY`.
    pub busy_timeout: Duration,
    /// Use write-ahead logging (one writer, many concurrent readers).
    pub wal: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            busy_timeout: Duration::from_secs(5),
            wal: true,
        }
    }
}

/// SQLite-based store for scalar sensor readings.
///
/// Every method issues a single statement (or a single transaction) and
/// releases it before returning. Nothing is cached between calls.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a database at the given path with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, &StoreOptions::default())
    }

    /// Open or create a database at the given path.
    ///
    /// Missing parent directories are created. The schema is created or
    /// migrated to [`SCHEMA_VERSION`](crate::SCHEMA_VERSION) before this
    /// returns.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: &StoreOptions) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        info!("Opening database at {}", path.display());
        let mut conn = Connection::open(path)?;

        conn.busy_timeout(options.busy_timeout)?;
        if options.wal {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;",
            )?;
        }

        schema::initialize(&mut conn)?;

        Ok(Self { conn })
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        schema::initialize(&mut conn)?;
        Ok(Self { conn })
    }

    /// Schema version recorded in the database file.
    pub fn schema_version(&self) -> Result<i32> {
        schema::get_schema_version(&self.conn)
    }
}

// Write operations
impl Store {
    /// Append one reading.
    ///
    /// No existence check and no validation: duplicates, negative
    /// timestamps and non-finite values are stored as given. SQLite has no
    /// NaN, so a NaN value is stored as NULL and read back as NaN.
    pub fn add_scalar_reading(
        &self,
        tag: &str,
        resolution_tier: i32,
        timestamp_millis: i64,
        value: f64,
    ) -> Result<()> {
        self.conn.execute(
            &insert_sql(),
            params![tag, timestamp_millis, value, resolution_tier],
        )?;
        Ok(())
    }

    /// Append a batch of readings for one tag and tier in a single transaction.
    ///
    /// Returns the number of rows inserted. Either all points are stored or
    /// none are.
    pub fn add_scalar_readings(
        &self,
        tag: &str,
        resolution_tier: i32,
        points: &[ScalarPoint],
    ) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare_cached(&insert_sql())?;
            for point in points {
                inserted += stmt.execute(params![
                    tag,
                    point.timestamp_millis,
                    point.value,
                    resolution_tier
                ])?;
            }
        }
        tx.commit()?;

        debug!(
            "Inserted {} readings for {} at tier {}",
            inserted, tag, resolution_tier
        );
        Ok(inserted)
    }

    /// Delete every reading of `tag` inside `range`, across all resolution tiers.
    ///
    /// Returns the number of rows deleted.
    pub fn delete_scalar_readings(&self, tag: &str, range: &TimeRange) -> Result<usize> {
        let selection = Selection::build(tag, range, None);
        let sql = format!("DELETE FROM {TABLE} WHERE {}", selection.clause);

        debug!("Executing delete: {}", sql);
        let deleted = self
            .conn
            .execute(&sql, params_from_iter(selection.params.iter()))?;

        info!("Deleted {} readings for {} in {}", deleted, tag, range);
        Ok(deleted)
    }
}

fn insert_sql() -> String {
    format!(
        "INSERT INTO {TABLE} ({}, {}, {}, {}) VALUES (?1, ?2, ?3, ?4)",
        column::TAG,
        column::TIMESTAMP_MILLIS,
        column::VALUE,
        column::RESOLUTION_TIER
    )
}

// Read operations
impl Store {
    /// Read readings of `tag` inside `range`.
    ///
    /// `resolution_tier` of `None` (or a negative tier) matches every tier.
    /// Results are ordered by `range.order`. `max_records <= 0` returns every
    /// matching row; a positive value caps the row count in SQL, keeping the
    /// first rows in the requested order.
    pub fn get_scalar_readings(
        &self,
        tag: &str,
        range: &TimeRange,
        resolution_tier: Option<i32>,
        max_records: i64,
    ) -> Result<ScalarReadingList> {
        // Non-positive counts map to a limit of 0, which means unbounded
        let query = ScalarQuery::new(tag)
            .range(*range)
            .tier_opt(resolution_tier)
            .limit(u64::try_from(max_records).unwrap_or(0));
        self.query_scalar_readings(&query)
    }

    /// Run a [`ScalarQuery`] and materialize its rows.
    pub fn query_scalar_readings(&self, query: &ScalarQuery) -> Result<ScalarReadingList> {
        let (sql, params) = query.build_sql();

        debug!("Executing query: {}", sql);

        let mut stmt = self.conn.prepare(&sql)?;
        let points = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                let value: Option<f64> = row.get(1)?;
                Ok(ScalarPoint::new(row.get(0)?, value.unwrap_or(f64::NAN)))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Query returned {} readings", points.len());
        Ok(ScalarReadingList::new(points))
    }

    /// Count readings of `tag` inside `range`.
    pub fn count_scalar_readings(
        &self,
        tag: &str,
        range: &TimeRange,
        resolution_tier: Option<i32>,
    ) -> Result<u64> {
        let selection = Selection::build(tag, range, resolution_tier);
        let sql = format!("SELECT COUNT(*) FROM {TABLE} WHERE {}", selection.clause);

        let count: i64 = self.conn.query_row(
            &sql,
            params_from_iter(selection.params.iter()),
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }

    /// Tag of the earliest reading strictly after `timestamp_millis`.
    ///
    /// Searches every tag and tier. When several readings share that
    /// earliest timestamp, the one inserted first wins. Returns `None` when
    /// no reading is newer than `timestamp_millis`.
    pub fn get_first_tag_after(&self, timestamp_millis: i64) -> Result<Option<String>> {
        let sql = format!(
            "SELECT {tag} FROM {TABLE} WHERE {ts} > ?1 ORDER BY {ts} ASC, rowid ASC LIMIT 1",
            tag = column::TAG,
            ts = column::TIMESTAMP_MILLIS,
        );

        let tag = self
            .conn
            .query_row(&sql, [timestamp_millis], |row| row.get(0))
            .optional()?;

        Ok(tag)
    }

    /// All distinct tags, sorted.
    pub fn tags(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT DISTINCT {tag} FROM {TABLE} WHERE {tag} IS NOT NULL ORDER BY {tag}",
            tag = column::TAG
        ))?;

        let tags = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(tags)
    }
}
