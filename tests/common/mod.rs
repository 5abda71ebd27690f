#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use portier::config::HostConfig;
use portier::server::Shared;
use portier::site::VirtualHosts;
use tempfile::TempDir;

pub const SERVER_NAME: &str = "portier-test";

pub const SITE1_INDEX: &str = "<html><body><h1>Site un</h1></body></html>\n";
pub const SITE1_DOCS: &str = "<html><body><h1>Docs</h1></body></html>\n";
pub const SITE1_CSS: &str = "body { color: black; }\n";
pub const SITE2_INDEX: &str = "<html><body><h1>Site deux</h1></body></html>\n";
pub const SECRET: &str = "outside every site root\n";

/// Two site roots in a temporary directory, plus a file next to them that
/// neither site may serve.
///
/// ```text
/// <tmp>/secret.txt
/// <tmp>/siteweb1/index.html
/// <tmp>/siteweb1/style.css
/// <tmp>/siteweb1/docs/index.html
/// <tmp>/siteweb2/index.html
/// <tmp>/siteweb2/empty/            (no index.html)
/// ```
pub struct TestSites {
    pub dir: TempDir,
    pub shared: Arc<Shared>,
}

impl TestSites {
    pub fn new() -> Self {
        Self::with_limits(Duration::from_secs(5), 8192)
    }

    pub fn with_limits(read_timeout: Duration, max_head_bytes: usize) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();

        write(base, "secret.txt", SECRET);
        write(base, "siteweb1/index.html", SITE1_INDEX);
        write(base, "siteweb1/style.css", SITE1_CSS);
        write(base, "siteweb1/docs/index.html", SITE1_DOCS);
        write(base, "siteweb2/index.html", SITE2_INDEX);
        fs::create_dir_all(base.join("siteweb2/empty")).unwrap();

        let hosts = vec![
            HostConfig::new("siteweb1", base.join("siteweb1")).alias("localhost:8080"),
            HostConfig::new("siteweb2", base.join("siteweb2")),
        ];

        let shared = Shared {
            hosts: VirtualHosts::new(&hosts).unwrap(),
            server_name: SERVER_NAME.to_string(),
            read_timeout,
            max_head_bytes,
        };

        Self {
            dir,
            shared: Arc::new(shared),
        }
    }

    pub fn root1(&self) -> PathBuf {
        self.dir.path().join("siteweb1")
    }

    pub fn root2(&self) -> PathBuf {
        self.dir.path().join("siteweb2")
    }
}

fn write(base: &Path, rel: &str, content: &str) {
    let path = base.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Splits a raw response into its head (without the blank line) and body.
pub fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no blank line");

    let head = String::from_utf8(raw[..end].to_vec()).unwrap();
    (head, raw[end + 4..].to_vec())
}

/// Header names of a response head, in order, status line excluded.
pub fn header_names(head: &str) -> Vec<&str> {
    head.split("\r\n")
        .skip(1)
        .map(|line| line.split_once(':').unwrap().0)
        .collect()
}
