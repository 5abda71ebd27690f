//! Virtual host registry
//!
//! Maps `Host` header values to site roots. Built once at startup and only
//! read afterwards, so it is shared between workers without locking.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::HostConfig;
use crate::error::RequestError;

/// A site selected by the `Host` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualHost {
    /// Primary host name, used in logs
    pub name: String,

    /// Directory the site is served from
    pub root: PathBuf,
}

impl VirtualHost {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Lookup table from host name (or alias) to virtual host.
#[derive(Debug, Clone, Default)]
pub struct VirtualHosts {
    sites: Vec<VirtualHost>,
    by_name: HashMap<String, usize>,
}

impl VirtualHosts {
    /// Builds the registry from configuration.
    ///
    /// Fails if two sites claim the same host name.
    pub fn new(configs: &[HostConfig]) -> anyhow::Result<Self> {
        let mut hosts = Self::default();

        for config in configs {
            let index = hosts.sites.len();
            hosts.sites.push(VirtualHost::new(&config.name, &config.root));

            for name in config.host_names() {
                if hosts.by_name.insert(name.to_string(), index).is_some() {
                    anyhow::bail!("host name {name:?} is configured more than once");
                }
            }

            if !config.root.is_dir() {
                tracing::warn!(
                    host = %config.name,
                    root = %config.root.display(),
                    "Site root is not a directory"
                );
            }
        }

        Ok(hosts)
    }

    /// Exact, case-sensitive lookup of a host name.
    pub fn get(&self, host: &str) -> Option<&VirtualHost> {
        self.by_name.get(host).map(|&index| &self.sites[index])
    }

    /// Routes a request by its `Host` header value.
    ///
    /// A missing header and an unregistered name are both `UnknownHost`.
    pub fn route(&self, host: Option<&str>) -> Result<&VirtualHost, RequestError> {
        host.and_then(|name| self.get(name))
            .ok_or_else(|| RequestError::UnknownHost(host.map(str::to_string)))
    }

    /// All sites, in configuration order.
    pub fn sites(&self) -> &[VirtualHost] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
