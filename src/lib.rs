//! Portier - static file server for name-based virtual hosts
//!
//! Core library for request handling and site serving.

pub mod config;
pub mod error;
pub mod http;
pub mod server;
pub mod site;
