use anyhow::Context;
use delve_dns_domain::config::ServerConfig;
use delve_dns_domain::{CliOverrides, Config};
use std::net::{IpAddr, SocketAddr};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    Config::load(path, overrides).context("Failed to load configuration")
}

pub fn listen_address(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    let ip: IpAddr = server
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", server.bind_address))?;
    Ok(SocketAddr::new(ip, server.dns_port))
}
