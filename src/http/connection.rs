use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Utc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::timeout;

use crate::error::RequestError;
use crate::http::parser;
use crate::http::reader::read_head;
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;
use crate::server::Shared;
use crate::site::{files, resolver};

pub struct Connection<S> {
    stream: BufReader<S>,
    shared: Arc<Shared>,
    peer: Option<SocketAddr>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(String),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, shared: Arc<Shared>) -> Self {
        Self {
            stream: BufReader::new(stream),
            shared,
            peer: None,
            state: ConnectionState::Reading,
        }
    }

    pub fn with_peer(mut self, peer: SocketAddr) -> Self {
        self.peer = Some(peer);
        self
    }

    /// Serves exactly one request, then closes the connection.
    ///
    /// Errors are returned only when the response could not be written.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Ok(raw) => ConnectionState::Processing(raw),
                        Err(e) => {
                            let response = self.failure(&e);
                            ConnectionState::Writing(ResponseWriter::new(&response))
                        }
                    };
                }

                ConnectionState::Processing(raw) => {
                    let response = handle_request(&self.shared, &raw, self.peer).await;
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(mut writer) => {
                    let written = writer.write_to_stream(self.stream.get_mut()).await;
                    // Closed whether or not the write went through.
                    let _ = self.stream.get_mut().shutdown().await;
                    written?;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads the request head under the connection's read deadline.
    pub async fn read_request(&mut self) -> Result<String, RequestError> {
        let limit = self.shared.max_head_bytes;

        match timeout(self.shared.read_timeout, read_head(&mut self.stream, limit)).await {
            Ok(result) => result,
            Err(_) => Err(RequestError::ReadTimeout),
        }
    }

    fn failure(&self, e: &RequestError) -> Response {
        log_failure(e, self.peer);
        Response::error(e.status(), &self.shared.server_name, Utc::now())
    }
}

/// Runs the request pipeline and produces the one response to send.
///
/// Host routing comes first, then the request line, then the file.
pub async fn handle_request(shared: &Shared, raw: &str, peer: Option<SocketAddr>) -> Response {
    let request = Request::parse(raw);

    let response = match serve(shared, &request).await {
        Ok(response) => response,
        Err(e) => {
            log_failure(&e, peer);
            Response::error(e.status(), &shared.server_name, Utc::now())
        }
    };

    tracing::info!(
        peer = ?peer,
        host = request.host().unwrap_or("-"),
        method = request.method_hint(),
        target = request.line().map(|line| line.target.as_str()).unwrap_or("-"),
        status = response.status.as_u16(),
        "Request served"
    );

    response
}

async fn serve(shared: &Shared, request: &Request) -> Result<Response, RequestError> {
    let site = shared.hosts.route(request.host())?;
    let line = parser::validate(request)?;

    let resolved = resolver::resolve(site.root(), line.path()).await;
    let file = files::load(site.root(), &resolved).await?;

    Ok(Response::file(
        file.content,
        &file.content_type,
        &shared.server_name,
        Utc::now(),
    ))
}

fn log_failure(e: &RequestError, peer: Option<SocketAddr>) {
    match e.status() {
        StatusCode::InternalServerError => tracing::error!(peer = ?peer, "Internal failure: {}", e),
        StatusCode::NotFound => tracing::warn!(peer = ?peer, "{}", e),
        _ => tracing::debug!(peer = ?peer, "Rejected request: {}", e),
    }
}
