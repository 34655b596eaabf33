pub use crate::handler::{Handler, PathParams};
pub use crate::request::{MalformedRequest, Method, Request};
pub use crate::response::Response;
pub use crate::router::{RouteError, RouteMatch, Router};
pub use crate::server::Server;
