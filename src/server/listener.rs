use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::Shared;
use crate::server::pool::WorkerPool;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let shared = Arc::new(Shared::from_config(cfg)?);

    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.listen_addr))?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, shared, cfg.server.workers, cfg.server.queue_capacity).await
}

/// Accepts connections on `listener` and hands each one to the worker pool.
///
/// When every worker is busy and the queue is full, accepting pauses until
/// a slot frees up.
pub async fn serve(
    listener: TcpListener,
    shared: Arc<Shared>,
    workers: usize,
    queue_capacity: usize,
) -> anyhow::Result<()> {
    let pool = WorkerPool::new(workers, queue_capacity);
    info!(workers = pool.size(), queue_capacity, "Worker pool started");

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Failed to accept connection: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let shared = Arc::clone(&shared);
        pool.submit(async move {
            let mut conn = Connection::new(socket, shared).with_peer(peer);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        })
        .await?;
    }
}
