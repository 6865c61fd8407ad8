//! Data models for query results.

use std::io::Write;

use serde::Serialize;

use sensordb_types::{ScalarPoint, StreamConsumer};

use crate::error::Result;

/// Readings returned by a range query, fully copied out of the database.
///
/// The list owns its points in the order the query requested. Delivery to
/// a [`StreamConsumer`], [`as_pairs`](Self::as_pairs) and iteration all
/// read the same vector and never touch the database again.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScalarReadingList {
    points: Vec<ScalarPoint>,
}

impl ScalarReadingList {
    pub(crate) fn new(points: Vec<ScalarPoint>) -> Self {
        Self { points }
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Alias for [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Whether the query matched no rows.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Push every reading, in order, to `consumer`.
    pub fn deliver<C: StreamConsumer + ?Sized>(&self, consumer: &mut C) {
        for point in &self.points {
            consumer.add_data(point.timestamp_millis, point.value);
        }
    }

    /// The readings as `(timestamp, value)` pairs, in order.
    pub fn as_pairs(&self) -> Vec<(i64, f64)> {
        self.points.iter().map(ScalarPoint::as_pair).collect()
    }

    /// The readings as a slice of points, in order.
    pub fn points(&self) -> &[ScalarPoint] {
        &self.points
    }

    /// Iterate over the readings in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ScalarPoint> {
        self.points.iter()
    }

    /// Take ownership of the underlying points.
    pub fn into_points(self) -> Vec<ScalarPoint> {
        self.points
    }

    /// Write the readings as CSV with a `timestamp_millis,value` header.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        for point in &self.points {
            csv.serialize(point)?;
        }
        if self.points.is_empty() {
            csv.write_record(["timestamp_millis", "value"])?;
        }
        csv.flush()?;
        Ok(())
    }
}

impl IntoIterator for ScalarReadingList {
    type Item = ScalarPoint;
    type IntoIter = std::vec::IntoIter<ScalarPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScalarReadingList {
    type Item = &'a ScalarPoint;
    type IntoIter = std::slice::Iter<'a, ScalarPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
