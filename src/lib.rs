//! A minimal HTTP/1.1 server built without a web framework, for
//! learning how request handling works end to end.
//! * Hand-rolled [request parser](crate::request::RequestParser)
//! * Method and path based [routing](crate::router::Router) with
//!   `{name}` placeholder segments
//! * JSON [responses](crate::response::Response) via [`serde_json`](serde_json)
//! * Single or multi-threaded [TCP server](crate::server::TcpServer),
//!   one request per connection
//!
//! # Example
//! ```
//! use looplite::io::ReadWriteAdapter;
//! use looplite::prelude::*;
//! use looplite::router::Router;
//! use looplite::server::StreamServer;
//!
//! fn greet(_req: &Request, params: &PathParams) -> Response {
//!     Response::new(200).with_payload(serde_json::json!({"hello": params["name"]}))
//! }
//!
//! let router = Router::new().with_route(Method::GET, "/greet/{name}", greet);
//!
//! let request = b"GET /greet/bob HTTP/1.1\r\nHost: localhost\r\n\r\n";
//! let mut write_buf = vec![];
//! let stream = ReadWriteAdapter::new(&request[..], &mut write_buf);
//! let mut server = StreamServer::new(stream, router);
//! server.serve_one().unwrap();
//!
//! let response = std::str::from_utf8(&write_buf[..]).unwrap();
//! assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
//! assert!(response.ends_with("{\"hello\":\"bob\"}"));
//! ```
pub mod app;
pub mod handler;
pub mod io;
pub mod prelude;
pub mod request;
pub mod response;
pub mod router;
pub mod runner;
pub mod server;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
