//! End-to-end tests over a real TCP socket

mod common;

use common::{SITE1_INDEX, SITE2_INDEX, TestSites, split_response};
use portier::server::listener;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn start(sites: &TestSites, workers: usize, queue_capacity: usize) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shared = sites.shared.clone();
    tokio::spawn(async move {
        let _ = listener::serve(listener, shared, workers, queue_capacity).await;
    });

    addr
}

async fn fetch(addr: SocketAddr, request: &str) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_serves_both_sites() {
    let sites = TestSites::new();
    let addr = start(&sites, 2, 4).await;

    let raw = fetch(addr, "GET /index.html HTTP/1.1\r\nHost: siteweb1\r\n\r\n").await;
    let (head, body) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(body, SITE1_INDEX.as_bytes());

    let raw = fetch(addr, "GET / HTTP/1.1\r\nHost: siteweb2\r\n\r\n").await;
    let (head, body) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(body, SITE2_INDEX.as_bytes());
}

#[tokio::test]
async fn test_rejections_over_tcp() {
    let sites = TestSites::new();
    let addr = start(&sites, 2, 4).await;

    let raw = fetch(addr, "POST /x HTTP/1.1\r\nHost: siteweb1\r\n\r\n").await;
    assert!(raw.starts_with(b"HTTP/1.1 405 Method Not Allowed\r\n"));

    let raw = fetch(addr, "GET /x HTTP/1.1\r\nHost: unknown.example\r\n\r\n").await;
    assert!(raw.starts_with(b"HTTP/1.1 400 Bad Request\r\n"));

    let raw = fetch(addr, "NOTAMETHOD /x HTTP/9.9\r\n\r\n").await;
    assert!(raw.starts_with(b"HTTP/1.1 400 Bad Request\r\n"));

    let raw = fetch(addr, "GET /missing.html HTTP/1.1\r\nHost: siteweb1\r\n\r\n").await;
    assert!(raw.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
}

#[tokio::test]
async fn test_more_clients_than_workers() {
    let sites = TestSites::new();
    let addr = start(&sites, 2, 2).await;

    let clients: Vec<_> = (0..16)
        .map(|_| {
            tokio::spawn(fetch(
                addr,
                "GET /index.html HTTP/1.1\r\nHost: siteweb1\r\n\r\n",
            ))
        })
        .collect();

    for client in clients {
        let raw = client.await.unwrap();
        let (head, body) = split_response(&raw);
        assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
        assert_eq!(body, SITE1_INDEX.as_bytes());
    }
}
