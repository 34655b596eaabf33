//! Base for all request handlers.
use std::collections::HashMap;

use crate::request::Request;
use crate::response::Response;

/// Path parameters captured by the router, placeholder name to value.
pub type PathParams = HashMap<String, String>;

/// A Handler implements one HTTP endpoint: it maps a parsed [`Request`]
/// and its captured path parameters to a [`Response`]. Handlers are pure
/// apart from allowed external reads like the clock; validation failures
/// are returned as ordinary error responses, not propagated.
pub trait Handler: Sync + Send {
    fn handle(&self, request: &Request, params: &PathParams) -> Response;
}

impl<F> Handler for F
where
    F: Fn(&Request, &PathParams) -> Response + Send + Sync,
{
    fn handle(&self, request: &Request, params: &PathParams) -> Response {
        (self)(request, params)
    }
}
