//! HTTP protocol implementation.
//!
//! This module implements the strict HTTP/1.0 and HTTP/1.1 subset the
//! server speaks: one request head in, one response out, then close.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The per-connection handler and request pipeline
//! - **`reader`**: Reads the request head off the stream, up to the blank line
//! - **`parser`**: Request-line grammar, `Host` extraction and validation
//! - **`request`**: HTTP request representation
//! - **`response`**: Status table and response construction
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the request head (with deadline)
//!        └──────┬──────┘
//!               │ Head received, or read failed
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route host, validate, resolve, load file
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent (or write failed)
//!               ▼
//!             Closed
//! ```
//!
//! A failed read skips `Processing` and goes straight to `Writing` with
//! the matching error page.
//!
//! # Example
//!
//! ```ignore
//! use portier::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let shared = Arc::new(Shared::from_config(&Config::default())?);
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let shared = shared.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, shared);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
