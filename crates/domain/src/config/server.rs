use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    /// Largest datagram read from a client.
    #[serde(default = "default_max_datagram_size")]
    pub max_datagram_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            dns_port: default_dns_port(),
            max_datagram_size: default_max_datagram_size(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_dns_port() -> u16 {
    53
}

fn default_max_datagram_size() -> usize {
    512
}
