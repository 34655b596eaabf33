//! TCP HTTP server.
use std::io::prelude::*;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::*;

use crate::{
    request::RequestParser,
    response::Response,
    router::Router,
    runner::Runner,
    server::{dispatch, Server, ServerError},
    VERSION,
};

/// A single or multi-threaded TCP server.
///
/// Each accepted connection is handed off to the runner as an
/// independent job: parse one request, dispatch it through the route
/// table, write one response, close. The route table is read-only and
/// shared across jobs without locking.
pub struct TcpServer {
    listener: TcpListener,
    runner: Runner,
    router: Arc<Router>,
    timeout: Option<Duration>,
}

impl TcpServer {
    /// Create a new TCP server.
    ///
    /// # Arguments
    /// * `bind_addr`: address to listen on, such as "127.0.0.1:8080"
    /// * `n_threads`: number of threads.
    ///   - 0: create a new thread for each connection (not recommended)
    ///   - 1: single-threaded
    ///   - 2+: threadpool with n threads
    /// * `timeout`: network socket timeout, bounds header and body reads
    /// * `router`: route table, immutable once the server is built
    pub fn new(
        bind_addr: &str,
        n_threads: usize,
        timeout: Option<Duration>,
        router: Router,
    ) -> Result<Self, std::io::Error> {
        Ok(Self {
            listener: TcpListener::bind(bind_addr)?,
            runner: Runner::new(n_threads),
            timeout,
            router: Arc::new(router),
        })
    }
}

impl Server for TcpServer {
    /// Serve one connection.
    fn serve_one(&mut self) -> Result<(), ServerError> {
        let (mut stream, addr) = self.listener.accept()?;
        debug!("accepted connection from {:?}", addr);
        stream.set_read_timeout(self.timeout)?;
        stream.set_write_timeout(self.timeout)?;
        let router = Arc::clone(&self.router);
        self.runner.run(move || {
            let start = Instant::now();
            debug!("parsing request");
            let mut parser = RequestParser::new(&mut stream);
            let response;
            let path;
            let method;
            let content_length;
            match parser.parse() {
                Ok(request) => {
                    trace!("REQUEST {:?}", &request);
                    content_length = request.content_length;
                    path = request.path.clone();
                    method = request.method.to_string();
                    debug!("running request handler");
                    response = dispatch(&router, &request);
                }
                Err(e) => {
                    error!("{}", e);
                    response = Response::error(400, "Bad Request");
                    path = "<none>".to_string();
                    method = "<none>".to_string();
                    content_length = 0;
                }
            };
            let response = response
                .with_header("Server", &format!("looplite/{}", VERSION))
                .with_header("Connection", "close");
            trace!("RESPONSE: {:?}", &response);
            let status_code = response.status_code;
            let status = response.status.clone();
            let bytes = response.into_bytes();
            info!(
                "{:?} - {}ms - {} {} {} ({} bytes) -> {} {} ({} bytes)",
                std::thread::current().id(),
                start.elapsed().as_millis(),
                addr,
                method,
                path,
                content_length,
                status_code,
                status,
                bytes.len(),
            );
            debug!("writing response");
            // The peer may already be gone; nothing left to do but log.
            match stream.write_all(&bytes) {
                Ok(_) => (),
                Err(e) => error!("IO error: {}", e),
            }
        });
        Ok(())
    }
}
