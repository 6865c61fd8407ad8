//! Platform-agnostic types for scalar sensor readings.
//!
//! This crate provides the value types shared by the reading store
//! (sensordb-store) and its front ends.
//!
//! # Features
//!
//! - [`TimeRange`]: bounded or unbounded millisecond intervals with
//!   inclusive/exclusive ends, canonicalization and interval-notation parsing
//! - [`ScalarPoint`]: a single `(timestamp, value)` observation
//! - [`StreamConsumer`]: the push interface results are delivered to
//!
//! # Example
//!
//! ```
//! use sensordb_types::{ObservationOrder, TimeRange};
//!
//! let range: TimeRange = "(5,10]".parse()?;
//! let range = range.newest_first();
//! assert_eq!(range.order, ObservationOrder::NewestFirst);
//! assert_eq!(range.canonical(), TimeRange::closed_open(6, 11).newest_first());
//! # Ok::<(), sensordb_types::ParseError>(())
//! ```

pub mod error;
pub mod point;
pub mod range;

pub use error::{ParseError, ParseResult};
pub use point::{ScalarPoint, StreamConsumer};
pub use range::{ObservationOrder, TimeRange};
