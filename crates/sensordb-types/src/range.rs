//! Time ranges over integer millisecond timestamps.

use core::fmt;
use core::ops::{Bound, RangeBounds};
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Requested ordering of query results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObservationOrder {
    /// Ascending by timestamp.
    #[default]
    OldestFirst,
    /// Descending by timestamp.
    NewestFirst,
}

/// An interval of millisecond timestamps plus a result ordering.
///
/// Each side is independently unbounded, inclusive or exclusive, using
/// [`std::ops::Bound`]. A `TimeRange` never fails to construct: a range whose
/// lower end lies above its upper end is simply empty.
///
/// # Examples
///
/// ```
/// use sensordb_types::TimeRange;
///
/// let range = TimeRange::open_closed(5, 10);
/// assert!(!range.contains(5));
/// assert!(range.contains(10));
/// assert_eq!(range.canonical(), TimeRange::closed_open(6, 11));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeRange {
    /// Lower end of the interval.
    pub lower: Bound<i64>,
    /// Upper end of the interval.
    pub upper: Bound<i64>,
    /// Ordering requested for results read over this range.
    pub order: ObservationOrder,
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::all()
    }
}

impl TimeRange {
    /// Create a range from explicit bounds, ordered oldest first.
    #[must_use]
    pub const fn new(lower: Bound<i64>, upper: Bound<i64>) -> Self {
        Self {
            lower,
            upper,
            order: ObservationOrder::OldestFirst,
        }
    }

    /// Create a range from any standard range expression, e.g. `5..10` or `..=20`.
    #[must_use]
    pub fn from_bounds<R: RangeBounds<i64>>(bounds: R) -> Self {
        Self::new(bounds.start_bound().cloned(), bounds.end_bound().cloned())
    }

    /// The unbounded range covering every timestamp.
    #[must_use]
    pub const fn all() -> Self {
        Self::new(Bound::Unbounded, Bound::Unbounded)
    }

    /// `[lower, upper]`
    #[must_use]
    pub const fn closed(lower: i64, upper: i64) -> Self {
        Self::new(Bound::Included(lower), Bound::Included(upper))
    }

    /// `[lower, upper)`
    #[must_use]
    pub const fn closed_open(lower: i64, upper: i64) -> Self {
        Self::new(Bound::Included(lower), Bound::Excluded(upper))
    }

    /// `(lower, upper]`
    #[must_use]
    pub const fn open_closed(lower: i64, upper: i64) -> Self {
        Self::new(Bound::Excluded(lower), Bound::Included(upper))
    }

    /// `(lower, upper)`
    #[must_use]
    pub const fn open(lower: i64, upper: i64) -> Self {
        Self::new(Bound::Excluded(lower), Bound::Excluded(upper))
    }

    /// `[lower, +inf)`
    #[must_use]
    pub const fn at_least(lower: i64) -> Self {
        Self::new(Bound::Included(lower), Bound::Unbounded)
    }

    /// `(lower, +inf)`
    #[must_use]
    pub const fn greater_than(lower: i64) -> Self {
        Self::new(Bound::Excluded(lower), Bound::Unbounded)
    }

    /// `(-inf, upper]`
    #[must_use]
    pub const fn at_most(upper: i64) -> Self {
        Self::new(Bound::Unbounded, Bound::Included(upper))
    }

    /// `(-inf, upper)`
    #[must_use]
    pub const fn less_than(upper: i64) -> Self {
        Self::new(Bound::Unbounded, Bound::Excluded(upper))
    }

    /// Return the same interval with a different result ordering.
    #[must_use]
    pub const fn with_order(mut self, order: ObservationOrder) -> Self {
        self.order = order;
        self
    }

    /// Return the same interval ordered newest first.
    #[must_use]
    pub const fn newest_first(self) -> Self {
        self.with_order(ObservationOrder::NewestFirst)
    }

    /// Return the same interval ordered oldest first.
    #[must_use]
    pub const fn oldest_first(self) -> Self {
        self.with_order(ObservationOrder::OldestFirst)
    }

    /// Normalize the interval to closed-open form over the `i64` domain.
    ///
    /// An exclusive lower bound `x` becomes inclusive `x + 1` and an
    /// inclusive upper bound `y` becomes exclusive `y + 1`. Unbounded sides
    /// stay unbounded. Two edge cases have no successor to shift to:
    /// an inclusive upper bound at `i64::MAX` already covers the top of the
    /// domain and becomes unbounded, while an exclusive lower bound at
    /// `i64::MAX` stays exclusive (the range is empty).
    ///
    /// The canonical range contains exactly the same timestamps as `self`.
    #[must_use]
    pub fn canonical(&self) -> Self {
        let lower = match self.lower {
            Bound::Excluded(x) => x.checked_add(1).map_or(Bound::Excluded(x), Bound::Included),
            other => other,
        };
        let upper = match self.upper {
            Bound::Included(y) => y.checked_add(1).map_or(Bound::Unbounded, Bound::Excluded),
            other => other,
        };
        Self {
            lower,
            upper,
            order: self.order,
        }
    }

    /// Whether `timestamp_millis` falls inside the interval.
    #[must_use]
    pub fn contains(&self, timestamp_millis: i64) -> bool {
        RangeBounds::contains(self, &timestamp_millis)
    }

    /// Whether the interval contains no timestamp at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let canonical = self.canonical();
        match (canonical.lower, canonical.upper) {
            (Bound::Excluded(_), _) => true,
            (Bound::Included(lo), Bound::Excluded(hi)) => lo >= hi,
            (Bound::Unbounded, Bound::Excluded(hi)) => hi == i64::MIN,
            _ => false,
        }
    }
}

impl RangeBounds<i64> for TimeRange {
    fn start_bound(&self) -> Bound<&i64> {
        self.lower.as_ref()
    }

    fn end_bound(&self) -> Bound<&i64> {
        self.upper.as_ref()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lower {
            Bound::Included(x) => write!(f, "[{x},")?,
            Bound::Excluded(x) => write!(f, "({x},")?,
            Bound::Unbounded => f.write_str("(,")?,
        }
        match self.upper {
            Bound::Included(y) => write!(f, "{y}]"),
            Bound::Excluded(y) => write!(f, "{y})"),
            Bound::Unbounded => f.write_str(")"),
        }
    }
}

/// Parse interval notation such as `[5,10)`, `(5,10]`, `[100,)` or `(-inf,0]`.
///
/// An empty endpoint or `inf`/`-inf`/`+inf` means unbounded on that side.
/// The parsed range is ordered oldest first.
impl FromStr for TimeRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = |reason: &str| ParseError::InvalidRange(format!("'{s}': {reason}"));

        let mut chars = s.chars();
        let open = chars.next().ok_or_else(|| invalid("empty input"))?;
        let close = chars.next_back().ok_or_else(|| invalid("missing closing bracket"))?;
        let inner = chars.as_str();
        if !matches!(open, '[' | '(') {
            return Err(invalid("range must start with '[' or '('"));
        }

        let (lo, hi) = inner
            .split_once(',')
            .ok_or_else(|| invalid("expected two endpoints separated by ','"))?;
        if hi.contains(',') {
            return Err(invalid("expected exactly one ','"));
        }

        let lo = parse_endpoint(lo).map_err(|e| invalid(e.as_str()))?;
        let hi = parse_endpoint(hi).map_err(|e| invalid(e.as_str()))?;

        let lower = match (open, lo) {
            (_, None) => Bound::Unbounded,
            ('[', Some(x)) => Bound::Included(x),
            (_, Some(x)) => Bound::Excluded(x),
        };
        let upper = match (close, hi) {
            (']' | ')', None) => Bound::Unbounded,
            (']', Some(y)) => Bound::Included(y),
            (')', Some(y)) => Bound::Excluded(y),
            _ => return Err(invalid("range must end with ']' or ')'")),
        };
        Ok(Self::new(lower, upper))
    }
}

fn parse_endpoint(text: &str) -> Result<Option<i64>, String> {
    let text = text.trim();
    match text {
        "" | "inf" | "-inf" | "+inf" => Ok(None),
        _ => text
            .parse::<i64>()
            .map(Some)
            .map_err(|e| format!("invalid endpoint '{text}': {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_is_unbounded_oldest_first() {
        let range = TimeRange::default();
        assert_eq!(range.lower, Bound::Unbounded);
        assert_eq!(range.upper, Bound::Unbounded);
        assert_eq!(range.order, ObservationOrder::OldestFirst);
        assert!(range.contains(i64::MIN));
        assert!(range.contains(i64::MAX));
    }

    #[test]
    fn test_canonical_open_lower_closed_upper() {
        let canonical = TimeRange::open_closed(5, 10).canonical();
        assert_eq!(canonical.lower, Bound::Included(6));
        assert_eq!(canonical.upper, Bound::Excluded(11));
        assert_eq!(canonical, TimeRange::closed(6, 10).canonical());
    }

    #[test]
    fn test_canonical_keeps_closed_open() {
        let range = TimeRange::closed_open(-3, 7);
        assert_eq!(range.canonical(), range);
    }

    #[test]
    fn test_canonical_keeps_unbounded_sides() {
        assert_eq!(TimeRange::all().canonical(), TimeRange::all());
        assert_eq!(
            TimeRange::greater_than(0).canonical(),
            TimeRange::at_least(1)
        );
        assert_eq!(TimeRange::at_most(0).canonical(), TimeRange::less_than(1));
    }

    #[test]
    fn test_canonical_domain_edges() {
        let top = TimeRange::at_most(i64::MAX).canonical();
        assert_eq!(top.upper, Bound::Unbounded);

        let beyond = TimeRange::greater_than(i64::MAX).canonical();
        assert_eq!(beyond.lower, Bound::Excluded(i64::MAX));
        assert!(beyond.is_empty());
    }

    #[test]
    fn test_canonical_preserves_order() {
        let range = TimeRange::closed(1, 2).newest_first();
        assert_eq!(range.canonical().order, ObservationOrder::NewestFirst);
    }

    #[test]
    fn test_is_empty() {
        assert!(TimeRange::open(5, 6).is_empty());
        assert!(TimeRange::closed_open(5, 5).is_empty());
        assert!(TimeRange::closed(7, 3).is_empty());
        assert!(TimeRange::less_than(i64::MIN).is_empty());
        assert!(!TimeRange::closed(5, 5).is_empty());
        assert!(!TimeRange::all().is_empty());
    }

    #[test]
    fn test_from_bounds() {
        assert_eq!(TimeRange::from_bounds(5..10), TimeRange::closed_open(5, 10));
        assert_eq!(TimeRange::from_bounds(..=20), TimeRange::at_most(20));
        assert_eq!(TimeRange::from_bounds(..), TimeRange::all());
    }

    #[test]
    fn test_parse_interval_notation() {
        assert_eq!("[5,10)".parse::<TimeRange>().unwrap(), TimeRange::closed_open(5, 10));
        assert_eq!("(5,10]".parse::<TimeRange>().unwrap(), TimeRange::open_closed(5, 10));
        assert_eq!(" [ -4 , 4 ] ".parse::<TimeRange>().unwrap(), TimeRange::closed(-4, 4));
        assert_eq!("[100,)".parse::<TimeRange>().unwrap(), TimeRange::at_least(100));
        assert_eq!("(-inf,0]".parse::<TimeRange>().unwrap(), TimeRange::at_most(0));
        assert_eq!("(,)".parse::<TimeRange>().unwrap(), TimeRange::all());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "[", "5,10", "[5;10]", "[5,10", "{5,10}", "[a,10]", "[1,2,3]"] {
            let err = bad.parse::<TimeRange>().unwrap_err();
            assert!(matches!(err, ParseError::InvalidRange(_)), "{bad} -> {err:?}");
        }
    }

    #[test]
    fn test_display_matches_parse() {
        for text in ["[5,10)", "(5,10]", "[100,)", "(,0]", "(,)"] {
            let range: TimeRange = text.parse().unwrap();
            assert_eq!(range.to_string(), text);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip_keeps_bounds() {
        let range = TimeRange::open_closed(1, 9).newest_first();
        let json = serde_json::to_string(&range).unwrap();
        let back: TimeRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, range);
    }

    fn bound_strategy() -> impl Strategy<Value = Bound<i64>> {
        prop_oneof![
            Just(Bound::Unbounded),
            any::<i64>().prop_map(Bound::Included),
            any::<i64>().prop_map(Bound::Excluded),
            (-50i64..50).prop_map(Bound::Included),
            (-50i64..50).prop_map(Bound::Excluded),
        ]
    }

    proptest! {
        /// Canonicalization never changes which timestamps are in range.
        #[test]
        fn canonical_has_same_members(
            lower in bound_strategy(),
            upper in bound_strategy(),
            ts in prop_oneof![any::<i64>(), -60i64..60, Just(i64::MIN), Just(i64::MAX)],
        ) {
            let range = TimeRange::new(lower, upper);
            prop_assert_eq!(range.contains(ts), range.canonical().contains(ts));
        }

        /// Canonical ranges use inclusive lower and exclusive upper bounds
        /// wherever the domain allows it.
        #[test]
        fn canonical_is_closed_open(lower in bound_strategy(), upper in bound_strategy()) {
            let canonical = TimeRange::new(lower, upper).canonical();
            prop_assert!(!matches!(canonical.upper, Bound::Included(_)));
            if let Bound::Excluded(x) = canonical.lower {
                prop_assert_eq!(x, i64::MAX);
            }
        }

        /// Canonicalization is idempotent.
        #[test]
        fn canonical_is_idempotent(lower in bound_strategy(), upper in bound_strategy()) {
            let canonical = TimeRange::new(lower, upper).canonical();
            prop_assert_eq!(canonical.canonical(), canonical);
        }
    }
}
