use compact_str::CompactString;
use delve_dns_domain::RecordType;
use serde::{Deserialize, Serialize};

/// Exact (name, type) key. Names are compared byte for byte; no case
/// folding or suffix matching.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub domain: CompactString,
    pub record_type: RecordType,
}

impl CacheKey {
    #[inline]
    pub fn new(domain: &str, record_type: RecordType) -> Self {
        Self {
            domain: CompactString::from(domain),
            record_type,
        }
    }
}
