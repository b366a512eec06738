use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock Unix milliseconds. Cache lifetimes are persisted across
/// restarts, so they are measured against the system clock rather than
/// `Instant`; sub-second precision keeps a TTL of N seconds from shrinking
/// when it starts late in a second.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
