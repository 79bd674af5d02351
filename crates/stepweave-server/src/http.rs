//! Minimal HTTP/1.1 codec.
//!
//! Just enough of the protocol for a two-route JSON API: request line,
//! headers, `Content-Length` body, and a `Connection: close` response. A
//! body size cap protects against unbounded allocation from malformed or
//! hostile `Content-Length` values.

use std::io::{self, BufRead, Read, Write};

/// Maximum accepted request body (4 MB). A fit request is a few numeric
/// arrays; anything larger is garbage.
pub const MAX_BODY_SIZE: usize = 4 * 1024 * 1024;

/// A parsed HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

/// Read one request from the stream.
///
/// Returns `Ok(None)` when the peer closed the connection before sending a
/// request line; malformed framing is an `InvalidData` error.
pub fn read_request<R: BufRead>(reader: &mut R) -> io::Result<Option<Request>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();
    if method.is_empty() || path.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "malformed request line",
        ));
    }

    // Headers: only Content-Length matters to us.
    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed mid-headers",
            ));
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().map_err(|_| {
                    io::Error::new(io::ErrorKind::InvalidData, "bad Content-Length")
                })?;
            }
        }
    }

    if content_length > MAX_BODY_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("body too large: {content_length} bytes (max {MAX_BODY_SIZE})"),
        ));
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;

    Ok(Some(Request { method, path, body }))
}

/// An HTTP response ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// A JSON response with the given status.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self {
            status,
            body: value.to_string().into_bytes(),
        }
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Write a response and flush. Connections are one-shot (`Connection:
/// close`), which keeps the per-connection thread simple.
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> io::Result<()> {
    write!(
        writer,
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason(response.status),
        response.body.len()
    )?;
    writer.write_all(&response.body)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    #[test]
    fn test_read_request_with_body() {
        let raw = b"POST /api/curves/fit HTTP/1.1\r\nHost: x\r\nContent-Length: 4\r\n\r\nabcd";
        let mut reader = BufReader::new(Cursor::new(&raw[..]));
        let request = read_request(&mut reader).unwrap().unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/api/curves/fit");
        assert_eq!(request.body, b"abcd");
    }

    #[test]
    fn test_read_request_no_body() {
        let raw = b"GET /api/wolfram/status HTTP/1.1\r\n\r\n";
        let mut reader = BufReader::new(Cursor::new(&raw[..]));
        let request = read_request(&mut reader).unwrap().unwrap();
        assert_eq!(request.method, "GET");
        assert!(request.body.is_empty());
    }

    #[test]
    fn test_read_request_closed_connection() {
        let mut reader = BufReader::new(Cursor::new(&b""[..]));
        assert!(read_request(&mut reader).unwrap().is_none());
    }

    #[test]
    fn test_read_request_rejects_oversized_body() {
        let raw = format!(
            "POST /x HTTP/1.1\r\nContent-Length: {}\r\n\r\n",
            MAX_BODY_SIZE + 1
        );
        let mut reader = BufReader::new(Cursor::new(raw.into_bytes()));
        assert!(read_request(&mut reader).is_err());
    }

    #[test]
    fn test_write_response_shape() {
        let mut out = Vec::new();
        let response = Response::json(200, &serde_json::json!({"ok": true}));
        write_response(&mut out, &response).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: application/json"));
        assert!(text.ends_with("{\"ok\":true}"));
    }
}
