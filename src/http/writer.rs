use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &[u8] = b"HTTP/1.1";

/// Encodes a response into one contiguous buffer, head then body.
pub fn serialize_response(resp: &Response) -> Bytes {
    let head_len: usize = resp
        .headers
        .iter()
        .map(|(k, v)| k.len() + v.len() + 4)
        .sum();
    let mut buf = BytesMut::with_capacity(64 + head_len + resp.body.len());

    buf.put_slice(HTTP_VERSION);
    buf.put_u8(b' ');
    buf.put_slice(resp.status.as_u16().to_string().as_bytes());
    buf.put_u8(b' ');
    buf.put_slice(resp.status.reason_phrase().as_bytes());
    buf.put_slice(b"\r\n");

    for (name, value) in &resp.headers {
        buf.put_slice(name.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(value.as_bytes());
        buf.put_slice(b"\r\n");
    }
    buf.put_slice(b"\r\n");

    buf.put_slice(&resp.body);
    buf.freeze()
}

/// Pushes one serialized response onto a stream.
pub struct ResponseWriter {
    pending: Bytes,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            pending: serialize_response(response),
        }
    }

    /// Bytes still waiting to go out.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Writes the whole response. A failed write is not retried.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.pending.has_remaining() {
            let n = stream.write(&self.pending).await?;
            if n == 0 {
                anyhow::bail!("connection closed while writing");
            }
            self.pending.advance(n);
        }

        stream.flush().await?;
        Ok(())
    }
}
