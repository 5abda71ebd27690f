//! Accept loop and worker pool.

pub mod listener;
pub mod pool;

use std::time::Duration;

use crate::config::Config;
use crate::site::VirtualHosts;

/// Read-only state every connection handler consults.
///
/// Built once at startup and shared behind an `Arc`.
#[derive(Debug)]
pub struct Shared {
    pub hosts: VirtualHosts,
    /// `Server` header value
    pub server_name: String,
    pub read_timeout: Duration,
    pub max_head_bytes: usize,
}

impl Shared {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            hosts: VirtualHosts::new(&cfg.hosts)?,
            server_name: cfg.server.name.clone(),
            read_timeout: cfg.server.read_timeout(),
            max_head_bytes: cfg.server.max_head_bytes,
        })
    }
}
