//! Static site serving
//!
//! This module holds the virtual host registry, the mapping from request
//! paths to files, and the loading of those files from disk.

pub mod files;
pub mod registry;
pub mod resolver;

pub use files::StaticFile;
pub use registry::{VirtualHost, VirtualHosts};
pub use resolver::DEFAULT_DOCUMENT;
