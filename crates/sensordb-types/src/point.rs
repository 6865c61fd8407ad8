//! Scalar data points and the consumer interface they are delivered to.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single `(timestamp, value)` observation of a scalar sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScalarPoint {
    /// Observation time in milliseconds since the Unix epoch.
    pub timestamp_millis: i64,
    /// Measured value, kept at full `f64` precision.
    pub value: f64,
}

impl ScalarPoint {
    /// Create a new point.
    #[must_use]
    pub const fn new(timestamp_millis: i64, value: f64) -> Self {
        Self {
            timestamp_millis,
            value,
        }
    }

    /// The point as a `(timestamp, value)` tuple.
    #[must_use]
    pub const fn as_pair(&self) -> (i64, f64) {
        (self.timestamp_millis, self.value)
    }
}

impl From<(i64, f64)> for ScalarPoint {
    fn from((timestamp_millis, value): (i64, f64)) -> Self {
        Self::new(timestamp_millis, value)
    }
}

impl From<ScalarPoint> for (i64, f64) {
    fn from(point: ScalarPoint) -> Self {
        point.as_pair()
    }
}

/// Receiver for readings pushed out of a result set.
///
/// `add_data` is called once per row, in the order of the result.
///
/// Any `FnMut(i64, f64)` closure is a consumer:
///
/// ```
/// use sensordb_types::StreamConsumer;
///
/// let mut total = 0.0;
/// let mut sum = |_ts: i64, value: f64| total += value;
/// sum.add_data(1, 2.0);
/// sum.add_data(2, 3.0);
/// assert_eq!(total, 5.0);
/// ```
pub trait StreamConsumer {
    /// Receive one reading.
    fn add_data(&mut self, timestamp_millis: i64, value: f64);
}

impl<F> StreamConsumer for F
where
    F: FnMut(i64, f64),
{
    fn add_data(&mut self, timestamp_millis: i64, value: f64) {
        self(timestamp_millis, value)
    }
}

impl StreamConsumer for Vec<ScalarPoint> {
    fn add_data(&mut self, timestamp_millis: i64, value: f64) {
        self.push(ScalarPoint::new(timestamp_millis, value));
    }
}
