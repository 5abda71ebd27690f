//! Server configuration.
//!
//! Loaded from YAML, with defaults for every field. The defaults describe
//! the stock two-site deployment.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail, ensure};
use serde::Deserialize;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "PORTIER_CONFIG";

/// File picked up from the working directory when `PORTIER_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "portier.yaml";

/// Environment variable overriding the listen address.
pub const LISTEN_ENV: &str = "LISTEN";

const MIN_HEAD_BYTES: usize = 256;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub hosts: Vec<HostConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g. "0.0.0.0:8080")
    pub listen_addr: String,
    /// Value of the `Server` response header
    pub name: String,
    /// Number of worker tasks, each serving one connection at a time
    pub workers: usize,
    /// Accepted connections allowed to wait for a free worker
    pub queue_capacity: usize,
    /// Deadline for receiving a complete request head
    pub read_timeout_secs: u64,
    /// Largest request head accepted, in bytes
    pub max_head_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            name: concat!("portier/", env!("CARGO_PKG_VERSION")).to_string(),
            workers: 10,
            queue_capacity: 64,
            read_timeout_secs: 10,
            max_head_bytes: 8192,
        }
    }
}

impl ServerConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

/// One virtual host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostConfig {
    /// `Host` header value selecting this site
    pub name: String,
    /// Directory the site is served from
    pub root: PathBuf,
    /// Further `Host` values selecting the same site
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl HostConfig {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            aliases: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// The name followed by every alias.
    pub fn host_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

fn default_hosts() -> Vec<HostConfig> {
    vec![
        HostConfig::new("siteweb1", "./sites/siteweb1").alias("localhost:8080"),
        HostConfig::new("siteweb2", "./sites/siteweb2"),
    ]
}

impl Default for Config {
    /// The built-in two-site configuration.
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            hosts: default_hosts(),
        }
    }
}

impl Config {
    /// Loads the configuration for this process.
    ///
    /// Reads the file named by `PORTIER_CONFIG`, else `./portier.yaml` if it
    /// exists, else falls back to defaults. `LISTEN` then overrides the
    /// listen address.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        if let Ok(addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = addr;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parses and validates a YAML document.
    ///
    /// Omitted sections keep their defaults.
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(text).context("failed to parse YAML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let server = &self.server;
        ensure!(server.workers > 0, "server.workers must be at least 1");
        ensure!(
            server.queue_capacity > 0,
            "server.queue_capacity must be at least 1"
        );
        ensure!(
            server.read_timeout_secs > 0,
            "server.read_timeout_secs must be at least 1"
        );
        ensure!(
            server.max_head_bytes >= MIN_HEAD_BYTES,
            "server.max_head_bytes must be at least {MIN_HEAD_BYTES}"
        );
        ensure!(!self.hosts.is_empty(), "at least one host must be configured");

        let mut seen = HashSet::new();
        for host in &self.hosts {
            for name in host.host_names() {
                if name.trim().is_empty() || name.contains(char::is_whitespace) {
                    bail!("invalid host name {name:?}");
                }
                if !seen.insert(name) {
                    bail!("host name {name:?} is configured more than once");
                }
            }
        }

        Ok(())
    }
}
