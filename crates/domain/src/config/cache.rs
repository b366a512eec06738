use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// Period of the sweep that drops expired entries and writes the snapshot.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Lifetime of an entry holding no records.
    #[serde(default = "default_empty_answer_ttl")]
    pub empty_answer_ttl: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            snapshot_path: default_snapshot_path(),
            sweep_interval_secs: default_sweep_interval_secs(),
            max_entries: default_max_entries(),
            empty_answer_ttl: default_empty_answer_ttl(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_snapshot_path() -> String {
    "delve-dns-cache.json".to_string()
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_max_entries() -> usize {
    100_000
}

fn default_empty_answer_ttl() -> u32 {
    30
}
