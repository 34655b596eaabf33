//! HTTP response, JSON response writer, and status codes.
use log::error;
use serde_json::Value;

pub mod status;

/// An HTTP response carrying a JSON payload.
///
/// Created fresh by a handler (or by the server for error outcomes) and
/// consumed exactly once by [`into_bytes`](Response::into_bytes).
///
/// # Example
/// ```
/// use looplite::response::Response;
///
/// let response = Response::new(200)
///     .with_payload(serde_json::json!({"message": "hi"}));
///
/// assert_eq!(response.status_code, 200);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status_code: u16,
    pub status: String,
    headers: Vec<(String, String)>,
    pub payload: Value,
}

impl Response {
    /// Create a new Response. Status is automatically set to the default
    /// reason phrase for the given code (200 -> "OK", etc.)
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            status: status::default(status_code),
            headers: vec![],
            payload: Value::Null,
        }
    }
    /// An error response with the uniform `{"error": <message>}` shape.
    pub fn error(status_code: u16, message: &str) -> Self {
        Self::new(status_code).with_payload(serde_json::json!({ "error": message }))
    }
    /// Add header.
    pub fn with_header(mut self, header: &str, value: &str) -> Self {
        self.headers.push((header.to_string(), value.to_string()));
        self
    }
    /// Set the JSON payload.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }
    fn payload_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.payload)
    }
    /// Write the HTTP response: status line, headers, then the JSON body
    /// with `Content-Type` and an exact `Content-Length`.
    pub fn into_bytes(mut self) -> Vec<u8> {
        let body = match self.payload_bytes() {
            Ok(body) => body,
            Err(e) => {
                error!("payload serialization failed: {}", e);
                self.status_code = 500;
                self.status = status::default(500);
                br#"{"error":"internal server error"}"#.to_vec()
            }
        };

        let mut bytes: Vec<u8> = vec![];
        let status_line = format!("HTTP/1.1 {} {}\r\n", self.status_code, self.status);
        bytes.extend(status_line.into_bytes());

        for (header, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", header, value);
            bytes.extend(header_line.into_bytes());
        }
        bytes.extend(
            format!(
                "Content-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\n",
                body.len()
            )
            .into_bytes(),
        );

        bytes.extend(b"\r\n");
        bytes.extend(body);
        bytes
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new(200)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_response_bytes() {
        let response = Response::error(500, "boom").with_header("Connection", "close");

        let actual = response.into_bytes();
        let expected = b"HTTP/1.1 500 Internal Server Error\r\n\
            Connection: close\r\n\
            Content-Type: application/json; charset=utf-8\r\n\
            Content-Length: 16\r\n\
            \r\n\
            {\"error\":\"boom\"}";
        assert_eq!(expected[..], actual[..]);
    }

    #[test]
    fn test_content_length_is_exact() {
        let bytes = Response::new(200)
            .with_payload(serde_json::json!({"a": 3, "b": 4, "sum": 7}))
            .into_bytes();
        let text = String::from_utf8(bytes).unwrap();
        let body = text.split("\r\n\r\n").nth(1).unwrap();
        assert!(text.contains(&format!("Content-Length: {}\r\n", body.len())));
        assert_eq!(
            serde_json::from_str::<Value>(body).unwrap(),
            serde_json::json!({"a": 3, "b": 4, "sum": 7})
        );
    }
}
