use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::error::RequestError;

/// Reads a request head line by line until the blank line that ends it.
///
/// Each line is stored with a CRLF terminator and a final CRLF closes the
/// block. No body is read, whatever the method or `Content-Length`. If the
/// stream ends first, whatever arrived is returned as the whole head.
///
/// Fails with `HeadTooLarge` once more than `limit` bytes arrive without a
/// blank line.
pub async fn read_head<R>(reader: &mut R, limit: usize) -> Result<String, RequestError>
where
    R: AsyncBufRead + Unpin,
{
    let mut head = BytesMut::with_capacity(1024);
    let mut line = Vec::with_capacity(256);
    let mut consumed = 0usize;

    loop {
        line.clear();

        // One past the limit so an oversized head is detectable.
        let budget = (limit + 1).saturating_sub(consumed) as u64;
        let n = (&mut *reader).take(budget).read_until(b'\n', &mut line).await?;
        consumed += n;

        if consumed > limit {
            return Err(RequestError::HeadTooLarge(limit));
        }

        // Stream closed
        if n == 0 {
            break;
        }

        let content = strip_terminator(&line);
        if content.is_empty() {
            break;
        }

        head.put_slice(content);
        head.put_slice(b"\r\n");

        if !line.ends_with(b"\n") {
            // Stream closed mid-line
            break;
        }
    }

    head.put_slice(b"\r\n");
    Ok(String::from_utf8_lossy(&head).into_owned())
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stops_at_blank_line() {
        let mut input: &[u8] = b"GET / HTTP/1.1\r\nHost: siteweb1\r\n\r\nbody bytes";

        let head = read_head(&mut input, 8192).await.unwrap();

        assert_eq!(head, "GET / HTTP/1.1\r\nHost: siteweb1\r\n\r\n");
        assert_eq!(input, b"body bytes");
    }

    #[tokio::test]
    async fn partial_head_is_kept_on_eof() {
        let mut input: &[u8] = b"GET / HTTP/1.1\r\nHost: sitew";

        let head = read_head(&mut input, 8192).await.unwrap();

        assert_eq!(head, "GET / HTTP/1.1\r\nHost: sitew\r\n\r\n");
    }
}
