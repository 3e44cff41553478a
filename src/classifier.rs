//! Venue size classification
//!
//! Applied exactly once, when a candidate is turned into a stored record.
//! The stored flag is never re-evaluated afterwards.

/// Capacity below which a venue counts as small
pub const SMALL_VENUE_THRESHOLD: i64 = 500;

/// `true` iff the capacity is known and below [`SMALL_VENUE_THRESHOLD`]
pub fn classify(capacity: Option<i64>) -> bool {
    matches!(capacity, Some(c) if c < SMALL_VENUE_THRESHOLD)
}
