use chrono::{DateTime, TimeDelta, Utc};

/// Whether a user counts as online: last seen no longer than `threshold` ago
#[inline]
pub fn is_online(last_online: DateTime<Utc>, now: DateTime<Utc>, threshold: TimeDelta) -> bool {
    now.signed_duration_since(last_online) <= threshold
}
