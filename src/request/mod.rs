//! HTTP request and parser.
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub mod parser;

pub use parser::{MalformedRequest, RequestParser};

/// An HTTP request, read-only after parsing.
///
/// Header names are lower-cased at parse time; for both headers and
/// query parameters, the last occurrence of a duplicate name wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub content_length: usize,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
            query: HashMap::new(),
            headers: vec![("host".to_string(), "localhost".to_string())]
                .into_iter()
                .collect(),
            body: vec![],
            content_length: 0,
        }
    }
}

impl Request {
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_lowercase(), value.to_string());
        self
    }
    pub fn header(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_lowercase())
    }
    pub fn query_param(&self, name: &str) -> Option<&String> {
        self.query.get(name)
    }
    /// Request body as text, for handlers that treat it as opaque text.
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    PATCH,
    DELETE,
    CONNECT,
    OPTIONS,
    TRACE,
}

impl FromStr for Method {
    type Err = MalformedRequest;
    fn from_str(s: &str) -> Result<Method, MalformedRequest> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            "CONNECT" => Ok(Method::CONNECT),
            "OPTIONS" => Ok(Method::OPTIONS),
            "TRACE" => Ok(Method::TRACE),
            _ => Err(MalformedRequest::new(0, "invalid HTTP method")),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
