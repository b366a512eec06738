use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Seed server every iterative resolution starts from.
    #[serde(default = "default_root_server")]
    pub root_server: String,

    #[serde(default = "default_port")]
    pub root_port: u16,

    /// Port used when following glue addresses handed out in referrals.
    #[serde(default = "default_port")]
    pub referral_port: u16,

    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,

    #[serde(default = "default_max_referral_depth")]
    pub max_referral_depth: usize,

    #[serde(default = "default_max_queries_per_resolution")]
    pub max_queries_per_resolution: usize,
}

impl ResolverConfig {
    pub fn root_address(&self) -> Option<SocketAddr> {
        self.root_server
            .parse::<IpAddr>()
            .ok()
            .map(|ip| SocketAddr::new(ip, self.root_port))
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_server: default_root_server(),
            root_port: default_port(),
            referral_port: default_port(),
            query_timeout_secs: default_query_timeout_secs(),
            max_referral_depth: default_max_referral_depth(),
            max_queries_per_resolution: default_max_queries_per_resolution(),
        }
    }
}

// a.root-servers.net
fn default_root_server() -> String {
    "198.41.0.4".to_string()
}

fn default_port() -> u16 {
    53
}

fn default_query_timeout_secs() -> u64 {
    5
}

fn default_max_referral_depth() -> usize {
    12
}

fn default_max_queries_per_resolution() -> usize {
    64
}
