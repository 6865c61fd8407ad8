//! Predicate and query builders for scalar readings.
//!
//! [`Selection`] turns a tag, a [`TimeRange`] and an optional resolution tier
//! into a parameterized `WHERE` clause. The same selection drives reads,
//! counts and deletes, so every path agrees on which rows a range covers.
//! [`ScalarQuery`] wraps a selection with ordering and a row limit.
//!
//! # Example
//!
//! ```
//! use sensordb_store::{ScalarQuery, Store};
//! use sensordb_types::TimeRange;
//!
//! let store = Store::open_in_memory()?;
//! store.add_scalar_reading("temperature", 0, 1_000, 21.5)?;
//!
//! let query = ScalarQuery::new("temperature")
//!     .range(TimeRange::closed(0, 5_000).newest_first())
//!     .tier(0)
//!     .limit(50);
//!
//! let readings = store.query_scalar_readings(&query)?;
//! assert_eq!(readings.len(), 1);
//! # Ok::<(), sensordb_store::Error>(())
//! ```

use std::ops::Bound;

use rusqlite::types::Value;
use sensordb_types::{ObservationOrder, TimeRange};

use crate::schema::{TABLE, column};

/// A conjunctive `WHERE` predicate together with its bound parameters.
///
/// Parameters are listed in the order their `?` placeholders appear in
/// `clause`. Values are never interpolated into the SQL text.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Clauses joined with `AND`, without the `WHERE` keyword.
    pub clause: String,
    /// Parameter values for the placeholders in `clause`.
    pub params: Vec<Value>,
}

impl Selection {
    /// Build the selection for `tag` over `range`.
    ///
    /// A tier of `None` matches every resolution tier. Negative tiers are
    /// treated the same way, matching the legacy `-1` "all tiers" convention.
    /// The time range is canonicalized to closed-open form first, so e.g.
    /// `(5, 10]` and `[6, 10]` produce the same predicate.
    pub fn build(tag: &str, range: &TimeRange, tier: Option<i32>) -> Self {
        let mut clauses = Vec::new();
        let mut params = Vec::new();

        clauses.push(format!("{} = ?", column::TAG));
        params.push(Value::Text(tag.to_string()));

        if let Some(tier) = tier.filter(|t| *t >= 0) {
            clauses.push(format!("{} = ?", column::RESOLUTION_TIER));
            params.push(Value::Integer(i64::from(tier)));
        }

        let canonical = range.canonical();
        let lower = match canonical.lower {
            Bound::Included(x) => Some((">=", x)),
            Bound::Excluded(x) => Some((">", x)),
            Bound::Unbounded => None,
        };
        let upper = match canonical.upper {
            Bound::Included(y) => Some(("<=", y)),
            Bound::Excluded(y) => Some(("<", y)),
            Bound::Unbounded => None,
        };
        for (comparator, endpoint) in lower.into_iter().chain(upper) {
            clauses.push(format!("{} {} ?", column::TIMESTAMP_MILLIS, comparator));
            params.push(Value::Integer(endpoint));
        }

        Self {
            clause: clauses.join(" AND "),
            params,
        }
    }
}

/// Fluent query builder for scalar readings.
///
/// Use this to construct queries for
/// [`Store::query_scalar_readings`](crate::Store::query_scalar_readings).
/// By default a query covers every timestamp of the tag, in every tier,
/// oldest first, with no limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarQuery {
    /// Tag of the sensor stream.
    pub tag: String,
    /// Time range and result ordering.
    pub range: TimeRange,
    /// Resolution tier to match, or `None` for all tiers.
    pub tier: Option<i32>,
    /// Maximum number of rows, or `None` for all matching rows.
    pub limit: Option<u64>,
}

impl ScalarQuery {
    /// Create a query for every reading of `tag`.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            range: TimeRange::all(),
            tier: None,
            limit: None,
        }
    }

    /// Restrict to a time range. The range also carries the result ordering.
    pub fn range(mut self, range: TimeRange) -> Self {
        self.range = range;
        self
    }

    /// Restrict to a single resolution tier.
    pub fn tier(mut self, tier: i32) -> Self {
        self.tier = Some(tier);
        self
    }

    /// Restrict to `tier`, or match every tier when `None`.
    pub fn tier_opt(mut self, tier: Option<i32>) -> Self {
        self.tier = tier;
        self
    }

    /// Match readings of every resolution tier.
    pub fn any_tier(mut self) -> Self {
        self.tier = None;
        self
    }

    /// Fetch at most `limit` rows. A limit of 0 means no limit.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }

    /// Order results newest first.
    pub fn newest_first(mut self) -> Self {
        self.range = self.range.newest_first();
        self
    }

    /// Order results oldest first.
    pub fn oldest_first(mut self) -> Self {
        self.range = self.range.oldest_first();
        self
    }

    /// Build the selection for this query.
    pub(crate) fn selection(&self) -> Selection {
        Selection::build(&self.tag, &self.range, self.tier)
    }

    /// Build the full SQL query and its parameters.
    ///
    /// The limit is bound as the last parameter.
    pub(crate) fn build_sql(&self) -> (String, Vec<Value>) {
        let Selection { clause, mut params } = self.selection();
        let order = match self.range.order {
            ObservationOrder::OldestFirst => "ASC",
            ObservationOrder::NewestFirst => "DESC",
        };

        let mut sql = format!(
            "SELECT {ts}, {value} FROM {TABLE} WHERE {clause} ORDER BY {ts} {order}",
            ts = column::TIMESTAMP_MILLIS,
            value = column::VALUE,
        );

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ?");
            // SQLite integers are signed; a larger limit cannot be reached anyway
            params.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
        }

        (sql, params)
    }
}
