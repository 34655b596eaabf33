use std::collections::HashMap;
use std::fmt;
use std::io::prelude::*;
use std::str::FromStr;
use std::str::Utf8Error;

use crate::request::{Method, Request};

const REQUEST_PARSER_BUFFER_SIZE: usize = 1024;

/// Incremental HTTP/1.x request parser over any [`Read`] stream.
///
/// Reads exactly one request: request line, headers, and a body of
/// `Content-Length` bytes if that header is present. Never reads past
/// the end of the request, so the stream can be handed back to the
/// caller after [`parse`](RequestParser::parse).
pub struct RequestParser<R: Read> {
    buffer: [u8; REQUEST_PARSER_BUFFER_SIZE],
    buffer_position: usize,
    buffer_read_size: usize,
    peek: Option<u8>,
    stream_position: usize,
    eof: bool,
    stream: R,
}

const WHITESPACE: [u8; 2] = *b" \t";

fn whitespace(c: u8) -> bool {
    WHITESPACE.contains(&c)
}

impl<R: Read> RequestParser<R> {
    pub fn new(stream: R) -> Self {
        Self {
            peek: None,
            buffer: [0; REQUEST_PARSER_BUFFER_SIZE],
            stream,
            buffer_position: 0,
            buffer_read_size: 0,
            stream_position: 0,
            eof: false,
        }
    }
    fn error(&self, reason: &str) -> MalformedRequest {
        MalformedRequest::new(self.stream_position, reason)
    }
    /// Read next chunk from the input stream.
    fn read(&mut self) -> Result<()> {
        self.buffer_read_size = self.stream.read(&mut self.buffer)?;
        self.buffer_position = 0;
        Ok(())
    }
    /// Get next byte from the stream and advance peek. Calls `read` as
    /// needed when end of buffer is reached. Caller is responsible for
    /// setting `eof` to true before calling `next` if the end of stream
    /// is expected, otherwise it will hang on `read`.
    fn next(&mut self) -> Result<Option<u8>> {
        let curr = self.peek;
        if self.eof {
            self.peek = None;
            return Ok(curr);
        }
        if self.buffer_position == self.buffer_read_size {
            self.read()?;
        }
        if self.buffer_position == self.buffer_read_size {
            self.peek = None;
        } else {
            self.peek = Some(self.buffer[self.buffer_position]);
            self.buffer_position += 1;
            self.stream_position += 1;
        }
        Ok(curr)
    }
    fn expect(&mut self, b: u8) -> Result<()> {
        let next = self.next()?;
        if next == Some(b) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", b as char)))
        }
    }
    fn expects(&mut self, bs: &[u8]) -> Result<()> {
        for b in bs {
            self.expect(*b)?;
        }
        Ok(())
    }
    fn spaces(&mut self) -> Result<()> {
        if !self.peek.map_or(false, whitespace) {
            return Err(self.error("expected whitespace"));
        }
        while self.peek.map_or(false, whitespace) {
            self.next()?;
        }
        Ok(())
    }
    fn crlf(&mut self) -> Result<()> {
        self.expects(b"\r\n")
    }
    fn until(&mut self, b: u8) -> Result<Vec<u8>> {
        let mut word: Vec<u8> = vec![];
        while self.peek != Some(b) {
            word.push(
                self.next()?
                    .ok_or_else(|| self.error("unexpected end of input"))?,
            )
        }
        Ok(word)
    }
    fn until_any(&mut self, bs: &[u8]) -> Result<Vec<u8>> {
        let mut word: Vec<u8> = vec![];
        loop {
            match self.peek {
                Some(peek) if !bs.contains(&peek) => word.push(
                    self.next()?
                        .ok_or_else(|| self.error("unexpected end of input"))?,
                ),
                Some(_) => return Ok(word),
                None => return Err(self.error("unexpected end of input")),
            }
        }
    }
    fn method(&mut self) -> Result<Method> {
        let method = self.until_any(&WHITESPACE)?;
        Method::from_str(std::str::from_utf8(&method)?)
            .map_err(|_| self.error("invalid HTTP method"))
    }
    /// Request target, split at the first `?` into path and raw query.
    fn uri(&mut self) -> Result<(String, String)> {
        let uri = self.until_any(&WHITESPACE)?;
        let uri = std::str::from_utf8(&uri)?;
        if !uri.starts_with('/') {
            return Err(self.error("expected path starting with /"));
        }
        let mut parts = uri.splitn(2, '?');
        let path = parts.next().unwrap_or("").to_string();
        let query = parts.next().unwrap_or("").to_string();
        Ok((path, query))
    }
    fn version(&mut self) -> Result<()> {
        self.expects(b"HTTP/1.")?;
        match self.next()? {
            Some(b'0') | Some(b'1') => Ok(()),
            _ => Err(self.error("unsupported HTTP version")),
        }
    }
    fn header(&mut self) -> Result<(String, String)> {
        let name = self.until(b':')?;
        self.expect(b':')?;
        let value = self.until(b'\r')?;
        self.crlf()?;
        Ok((
            std::str::from_utf8(&name)?.trim().to_lowercase(),
            std::str::from_utf8(&value)?.trim().to_string(),
        ))
    }
    fn headers(&mut self) -> Result<Vec<(String, String)>> {
        let mut headers = vec![];
        while self.peek != Some(b'\r') {
            headers.push(self.header()?);
        }
        Ok(headers)
    }
    fn body(&mut self, content_length: usize) -> Result<Vec<u8>> {
        let mut buf = vec![];
        for i in 0..content_length {
            if i == content_length - 1 {
                self.eof = true;
            }
            if let Some(b) = self.next()? {
                buf.push(b);
            } else {
                return Err(self.error(&format!("expected {} more bytes", content_length - i)));
            }
        }
        Ok(buf)
    }
    /// Parse one HTTP request from the stream.
    pub fn parse(&mut self) -> Result<Request> {
        self.next()?;
        let method = self.method()?;
        self.spaces()?;
        let (path, query) = self.uri()?;
        self.spaces()?;
        self.version()?;
        self.crlf()?;
        let headers: HashMap<String, String> = self.headers()?.into_iter().collect();

        let content_length = match headers.get("content-length") {
            Some(cl_str) => match str::parse::<usize>(cl_str) {
                Ok(cl) => cl,
                Err(_) => return Err(self.error("invalid content-length")),
            },
            None => 0,
        };
        let body;
        if content_length == 0 {
            self.expect(b'\r')?;
            self.eof = true;
            self.expect(b'\n')?;
            body = vec![];
        } else {
            self.crlf()?;
            body = self.body(content_length)?;
        }
        Ok(Request {
            method,
            path,
            query: parse_query(&query),
            headers,
            body,
            content_length,
        })
    }
}

/// Parse a raw query string into a key-value map.
///
/// Pairs split on `&`, then on the first `=`; a pair with no `=` is a
/// key with an empty value. Keys and values are percent-decoded.
/// Malformed pairs are dropped, never fatal; duplicate keys keep the
/// last value.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let mut parts = pair.splitn(2, '=');
        let name = parts.next().unwrap_or("");
        let value = parts.next().unwrap_or("");
        match (urlencoding::decode(name), urlencoding::decode(value)) {
            (Ok(name), Ok(value)) => {
                params.insert(name.into_owned(), value.into_owned());
            }
            _ => continue,
        }
    }
    params
}

#[derive(Debug, Clone, PartialEq)]
pub struct MalformedRequest {
    position: usize,
    reason: String,
}

impl MalformedRequest {
    pub fn new(position: usize, reason: &str) -> Self {
        Self {
            position,
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for MalformedRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "malformed request at position {}: {}",
            self.position, self.reason
        )
    }
}

impl From<std::io::Error> for MalformedRequest {
    fn from(err: std::io::Error) -> Self {
        MalformedRequest::new(0, &err.to_string())
    }
}

impl From<Utf8Error> for MalformedRequest {
    fn from(err: Utf8Error) -> Self {
        MalformedRequest::new(0, &err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MalformedRequest>;
