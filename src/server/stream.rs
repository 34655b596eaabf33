//! Generic IO stream HTTP server.
use std::io::prelude::*;

use log::error;

use crate::{
    request::RequestParser,
    response::Response,
    router::Router,
    server::{dispatch, Server, ServerError},
    VERSION,
};

/// Serve HTTP requests over a generic stream, one request per call to
/// [`serve_one`](Server::serve_one). Backs the in-memory end-to-end
/// tests; the TCP server applies the same request cycle per connection.
///
/// # Example
/// ```
/// use looplite::app;
/// use looplite::io::ReadWriteAdapter;
/// use looplite::server::{Server, StreamServer};
///
/// let read_buf = b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n";
/// let mut write_buf = vec![];
/// let stream = ReadWriteAdapter::new(&read_buf[..], &mut write_buf);
/// let mut server = StreamServer::new(stream, app::routes());
/// server.serve_one().unwrap();
///
/// assert_eq!(
///     std::str::from_utf8(&write_buf[..]).unwrap(),
///     &format!(
///       "HTTP/1.1 200 OK\r\n\
///        Server: looplite/{}\r\n\
///        Connection: close\r\n\
///        Content-Type: application/json; charset=utf-8\r\n\
///        Content-Length: 34\r\n\
///        \r\n\
///        {{\"message\":\"Welcome to looplite!\"}}", looplite::VERSION
///     )
/// );
/// ```
pub struct StreamServer<S> {
    stream: S,
    router: Router,
}

impl<S> StreamServer<S> {
    pub fn new(stream: S, router: Router) -> Self {
        Self { stream, router }
    }
}

impl<S> Server for StreamServer<S>
where
    S: Read + Write,
{
    fn serve_one(&mut self) -> Result<(), ServerError> {
        let mut parser = RequestParser::new(&mut self.stream);
        let response = match parser.parse() {
            Ok(request) => dispatch(&self.router, &request),
            Err(e) => {
                error!("{}", e);
                Response::error(400, "Bad Request")
            }
        };
        let response = response
            .with_header("Server", &format!("looplite/{}", VERSION))
            .with_header("Connection", "close");
        self.stream.write_all(&response.into_bytes())?;
        self.stream.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::app;
    use crate::io::ReadWriteAdapter;
    use serde_json::{json, Value};

    /// Run one raw request through the full cycle and return
    /// (status code, parsed JSON body).
    fn roundtrip(request: &[u8]) -> (u16, Value) {
        let mut write_buf = vec![];
        let stream = ReadWriteAdapter::new(request, &mut write_buf);
        let mut server = StreamServer::new(stream, app::routes());
        server.serve_one().unwrap();

        let text = String::from_utf8(write_buf).unwrap();
        let mut parts = text.splitn(2, "\r\n\r\n");
        let head = parts.next().unwrap();
        let body = parts.next().unwrap();

        let status_line = head.lines().next().unwrap();
        assert!(status_line.starts_with("HTTP/1.1 "));
        let code = status_line
            .split_whitespace()
            .nth(1)
            .unwrap()
            .parse()
            .unwrap();

        let content_length: usize = head
            .lines()
            .find(|l| l.starts_with("Content-Length: "))
            .and_then(|l| l["Content-Length: ".len()..].parse().ok())
            .unwrap();
        assert_eq!(content_length, body.len());

        (code, serde_json::from_str(body).unwrap())
    }

    #[test]
    fn test_add_integers_end_to_end() {
        let (code, body) = roundtrip(b"GET /add/3/4 HTTP/1.1\r\nHost: localhost\r\n\r\n");
        assert_eq!(code, 200);
        assert_eq!(body, json!({"a": 3, "b": 4, "sum": 7}));
    }

    #[test]
    fn test_add_non_numeric_end_to_end() {
        let (code, body) = roundtrip(b"GET /add/3/foo HTTP/1.1\r\nHost: localhost\r\n\r\n");
        assert_eq!(code, 400);
        assert!(body["error"].is_string());
    }

    #[test]
    fn test_user_info_percent_decoded() {
        let (code, body) = roundtrip(
            b"GET /getuserinfo?user_id=42&username=John%20Doe HTTP/1.1\r\nHost: localhost\r\n\r\n",
        );
        assert_eq!(code, 200);
        assert_eq!(body, json!({"user_id": "42", "username": "John Doe"}));
    }

    #[test]
    fn test_user_info_missing_param() {
        let (code, body) =
            roundtrip(b"GET /getuserinfo?user_id=42 HTTP/1.1\r\nHost: localhost\r\n\r\n");
        assert_eq!(code, 400);
        assert_eq!(body, json!({"error": "missing query parameter(s): username"}));
    }

    #[test]
    fn test_status_end_to_end() {
        let (code, body) = roundtrip(b"GET /status HTTP/1.1\r\nHost: localhost\r\n\r\n");
        assert_eq!(code, 200);
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].is_string());
    }

    #[test]
    fn test_submit_end_to_end() {
        let (code, body) = roundtrip(
            b"POST /submitsomething HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello",
        );
        assert_eq!(code, 200);
        assert_eq!(body, json!({"received": "hello", "length": 5}));
    }

    #[test]
    fn test_submit_empty_body_end_to_end() {
        let (code, _) = roundtrip(b"POST /submitsomething HTTP/1.1\r\nHost: localhost\r\n\r\n");
        assert_eq!(code, 400);
    }

    #[test]
    fn test_unknown_path_end_to_end() {
        let (code, body) = roundtrip(b"GET /nope HTTP/1.1\r\nHost: localhost\r\n\r\n");
        assert_eq!(code, 404);
        assert_eq!(body, json!({"error": "Not Found"}));
    }

    #[test]
    fn test_wrong_method_end_to_end() {
        let (code, body) = roundtrip(b"POST / HTTP/1.1\r\nHost: localhost\r\n\r\n");
        assert_eq!(code, 405);
        assert_eq!(body, json!({"error": "Method Not Allowed"}));
    }

    #[test]
    fn test_malformed_request_end_to_end() {
        let (code, body) = roundtrip(b"GARBAGE\r\n\r\n");
        assert_eq!(code, 400);
        assert_eq!(body, json!({"error": "Bad Request"}));
    }
}
