use delve_dns_domain::ResourceRecord;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

const MILLIS_PER_SEC: u64 = 1_000;

#[derive(Debug)]
pub struct CachedEntry {
    pub records: Arc<[ResourceRecord]>,
    /// Expiry as a Unix timestamp (milliseconds).
    pub expires_at_millis: u64,
    pub marked_for_deletion: AtomicBool,
}

impl CachedEntry {
    /// The whole entry lives as long as its shortest-lived record.
    pub fn new(records: Vec<ResourceRecord>, empty_ttl: u32, now_millis: u64) -> Self {
        let lifetime = Self::lifetime_of(&records, empty_ttl);
        Self::with_remaining(records, lifetime as u64 * MILLIS_PER_SEC, now_millis)
    }

    pub fn with_remaining(
        records: Vec<ResourceRecord>,
        remaining_millis: u64,
        now_millis: u64,
    ) -> Self {
        Self {
            records: records.into(),
            expires_at_millis: now_millis.saturating_add(remaining_millis),
            marked_for_deletion: AtomicBool::new(false),
        }
    }

    pub fn lifetime_of(records: &[ResourceRecord], empty_ttl: u32) -> u32 {
        records
            .iter()
            .map(|record| record.ttl)
            .min()
            .unwrap_or(empty_ttl)
    }

    #[inline(always)]
    pub fn is_expired_at(&self, now_millis: u64) -> bool {
        now_millis >= self.expires_at_millis
    }

    pub fn remaining_millis(&self, now_millis: u64) -> u64 {
        self.expires_at_millis.saturating_sub(now_millis)
    }

    pub fn mark_for_deletion(&self) {
        self.marked_for_deletion.store(true, AtomicOrdering::Relaxed);
    }

    #[inline(always)]
    pub fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion.load(AtomicOrdering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_dns_domain::RecordData;
    use std::net::Ipv4Addr;

    fn record(ttl: u32) -> ResourceRecord {
        ResourceRecord::new("example.com", 1, ttl, RecordData::A(Ipv4Addr::LOCALHOST))
    }

    #[test]
    fn test_lifetime_is_minimum_ttl() {
        let entry = CachedEntry::new(vec![record(300), record(60), record(900)], 30, 1_000_000);
        assert_eq!(entry.expires_at_millis, 1_060_000);
        assert!(!entry.is_expired_at(1_059_999));
        assert!(entry.is_expired_at(1_060_000));
        assert_eq!(entry.remaining_millis(1_010_000), 50_000);
    }

    #[test]
    fn test_empty_entry_uses_fallback_ttl() {
        let entry = CachedEntry::new(vec![], 30, 1_000_000);
        assert_eq!(entry.expires_at_millis, 1_030_000);
    }

    #[test]
    fn test_zero_ttl_is_born_expired() {
        let entry = CachedEntry::new(vec![record(0)], 30, 1_000_000);
        assert!(entry.is_expired_at(1_000_000));
    }

    #[test]
    fn test_late_insert_keeps_full_second() {
        // Inserted 2ms before a second boundary.
        let entry = CachedEntry::new(vec![record(1)], 30, 1_000_998);
        assert!(!entry.is_expired_at(1_001_003));
        assert!(!entry.is_expired_at(1_001_997));
        assert!(entry.is_expired_at(1_001_998));
    }
}
