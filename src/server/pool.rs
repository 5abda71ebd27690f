//! Fixed-size worker pool
//!
//! A set of long-lived worker tasks pull jobs off one bounded queue. Each
//! worker runs a single job to completion before taking the next, so at most
//! `size` connections are in flight and at most `capacity` more wait.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

pub struct WorkerPool {
    sender: mpsc::Sender<Job>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `size` workers sharing a queue of `capacity` pending jobs.
    ///
    /// Zero values are raised to one.
    pub fn new(size: usize, capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel::<Job>(capacity.max(1));
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..size.max(1))
            .map(|id| tokio::spawn(worker_loop(id, Arc::clone(&receiver))))
            .collect();

        Self { sender, workers }
    }

    /// Number of workers.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Queues a job, waiting for room if the queue is full.
    pub async fn submit<F>(&self, job: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.sender
            .send(Box::pin(job))
            .await
            .map_err(|_| anyhow::anyhow!("worker pool is shut down"))
    }

    /// Closes the queue and waits for every worker to finish.
    ///
    /// Jobs already queued still run.
    pub async fn shutdown(self) {
        drop(self.sender);

        for worker in self.workers {
            if let Err(e) = worker.await {
                tracing::error!("Worker terminated abnormally: {}", e);
            }
        }
    }
}

async fn worker_loop(id: usize, receiver: Arc<Mutex<mpsc::Receiver<Job>>>) {
    tracing::debug!(worker = id, "Worker started");

    loop {
        let job = {
            let mut receiver = receiver.lock().await;
            receiver.recv().await
        };

        let Some(job) = job else {
            break;
        };

        // Run on its own task so a panicking job cannot take the worker down.
        if let Err(e) = tokio::spawn(job).await {
            tracing::error!(worker = id, "Job failed: {}", e);
        }
    }

    tracing::debug!(worker = id, "Worker exiting");
}
