//! HTTP server components.
use std::fmt;
use std::io;
use std::panic::{self, AssertUnwindSafe};

use log::error;

pub mod stream;
pub mod tcp;

pub use stream::StreamServer;
pub use tcp::TcpServer;

use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

#[derive(Debug)]
pub struct ServerError {
    message: String,
}

impl ServerError {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "server error: {}", &self.message)
    }
}

impl From<io::Error> for ServerError {
    fn from(err: io::Error) -> Self {
        ServerError::new(&format!("IOError({})", err))
    }
}

pub trait Server {
    /// Serve one connection, must be implemented.
    fn serve_one(&mut self) -> Result<(), ServerError>;
    /// Serve connections forever (default implementation). One
    /// connection's failure never aborts the accept loop.
    fn serve_forever(&mut self) {
        loop {
            match self.serve_one() {
                Ok(()) => (),
                Err(e) => error!("{}", e),
            }
        }
    }
}

/// Route a parsed request and run the matched handler.
///
/// Every outcome is an ordinary response: routing failures map to
/// 404/405, and a panicking handler is caught and mapped to a generic
/// 500 rather than taking down the worker.
pub fn dispatch(router: &Router, request: &Request) -> Response {
    let found = match router.lookup(request.method, &request.path) {
        Ok(found) => found,
        Err(e) => return Response::error(e.status_code(), &e.to_string()),
    };
    match panic::catch_unwind(AssertUnwindSafe(|| {
        found.handler.handle(request, &found.params)
    })) {
        Ok(response) => response,
        Err(_) => {
            error!("handler panicked for {} {}", request.method, request.path);
            Response::error(500, "Internal Server Error")
        }
    }
}
