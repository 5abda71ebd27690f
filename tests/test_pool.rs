//! Tests for the fixed-size worker pool

use portier::server::pool::WorkerPool;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;

#[tokio::test]
async fn test_pool_runs_every_job() {
    let pool = WorkerPool::new(3, 4);
    let done = Arc::new(AtomicUsize::new(0));

    for _ in 0..20 {
        let done = done.clone();
        pool.submit(async move {
            done.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .unwrap();
    }

    pool.shutdown().await;
    assert_eq!(done.load(Ordering::SeqCst), 20);
}

#[tokio::test]
async fn test_pool_size() {
    let pool = WorkerPool::new(4, 1);
    assert_eq!(pool.size(), 4);

    // Zero is raised to one
    let pool = WorkerPool::new(0, 0);
    assert_eq!(pool.size(), 1);
}

#[tokio::test]
async fn test_concurrency_never_exceeds_pool_size() {
    let pool = WorkerPool::new(2, 16);
    let running = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    for _ in 0..10 {
        let running = running.clone();
        let peak = peak.clone();
        pool.submit(async move {
            let now = running.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            running.fetch_sub(1, Ordering::SeqCst);
        })
        .await
        .unwrap();
    }

    pool.shutdown().await;
    assert!(peak.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn test_full_queue_applies_backpressure() {
    let pool = WorkerPool::new(1, 1);
    let (release, blocked) = oneshot::channel::<()>();
    let (started_tx, started_rx) = oneshot::channel::<()>();

    // Occupies the only worker
    pool.submit(async move {
        let _ = started_tx.send(());
        let _ = blocked.await;
    })
    .await
    .unwrap();
    started_rx.await.unwrap();

    // Fills the queue
    pool.submit(async {}).await.unwrap();

    // No room left: submit must wait
    let third = tokio::time::timeout(Duration::from_millis(50), pool.submit(async {})).await;
    assert!(third.is_err());

    release.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), pool.submit(async {}))
        .await
        .expect("queue should drain once the worker is free")
        .unwrap();

    pool.shutdown().await;
}

#[tokio::test]
async fn test_panicking_job_does_not_kill_worker() {
    let pool = WorkerPool::new(1, 4);
    let done = Arc::new(AtomicUsize::new(0));

    let nothing: Option<()> = None;
    pool.submit(async move { nothing.expect("job failure") })
        .await
        .unwrap();

    let counter = done.clone();
    pool.submit(async move {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .await
    .unwrap();

    pool.shutdown().await;
    assert_eq!(done.load(Ordering::SeqCst), 1);
}
