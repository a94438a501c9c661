//! Freshness rule for cached feeds

use chrono::{DateTime, Days, Utc};

/// Number of calendar days a cached feed stays fresh
pub const MAX_CACHE_AGE_DAYS: u64 = 7;

/// Decides whether a cache timestamp is still fresh
///
/// Days are UTC calendar days added with `checked_add_days`, never a fixed
/// count of seconds.
pub struct FeedCachePolicy;

impl FeedCachePolicy {
    /// Returns `true` iff `now` is strictly before `timestamp` + 7 days
    ///
    /// A timestamp so close to the end of the representable range that the
    /// boundary cannot be computed is treated as stale.
    pub fn validate(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match timestamp.checked_add_days(Days::new(MAX_CACHE_AGE_DAYS)) {
            Some(max_cache_age) => now < max_cache_age,
            None => false,
        }
    }
}
