//! Method and path based request routing.
use std::fmt;

use crate::handler::{Handler, PathParams};
use crate::request::Method;

enum Segment {
    Literal(String),
    Placeholder(String),
}

impl Segment {
    fn from_str(s: &str) -> Self {
        if s.starts_with('{') && s.ends_with('}') && s.len() > 2 {
            Self::Placeholder(s[1..s.len() - 1].to_string())
        } else {
            Self::Literal(s.to_string())
        }
    }
    fn matches(&self, s: &str) -> (bool, Option<(String, String)>) {
        match self {
            Self::Literal(p) => (s == &p[..], None),
            Self::Placeholder(p) => {
                if s.is_empty() {
                    (false, None)
                } else {
                    (true, Some((p.clone(), s.to_string())))
                }
            }
        }
    }
}

struct Route {
    method: Method,
    segments: Vec<Segment>,
    handler: Box<dyn Handler>,
}

impl Route {
    /// Segment match against a request path already split on '/'.
    /// Requires equal segment count; literals must match exactly,
    /// placeholders capture any non-empty segment.
    fn matches_path(&self, parts: &[&str]) -> Option<PathParams> {
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = PathParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            let (matches, param) = segment.matches(part);
            if !matches {
                return None;
            }
            if let Some((name, val)) = param {
                params.insert(name, val);
            }
        }
        Some(params)
    }
}

/// A successful route lookup: the matched handler and the path
/// parameters captured from placeholder segments.
pub struct RouteMatch<'a> {
    pub handler: &'a dyn Handler,
    pub params: PathParams,
}

impl<'a> fmt::Debug for RouteMatch<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("params", &self.params)
            .finish()
    }
}

/// Routing failure, surfaced as an ordinary 404 or 405 response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    NotFound,
    MethodNotAllowed,
}

impl RouteError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
        }
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "Not Found"),
            Self::MethodNotAllowed => write!(f, "Method Not Allowed"),
        }
    }
}

/// Router dispatches requests to handlers by method and path.
///
/// Route templates are `/`-delimited; a `{name}` segment matches any
/// single non-empty path segment and captures it. The table is built at
/// startup and immutable afterwards; the first fully-matching route in
/// registration order wins.
///
/// # Example
/// ```
/// use looplite::handler::PathParams;
/// use looplite::request::{Method, Request};
/// use looplite::response::Response;
/// use looplite::router::Router;
///
/// fn hello(_req: &Request, params: &PathParams) -> Response {
///     Response::new(200).with_payload(serde_json::json!({"name": params["name"]}))
/// }
///
/// let router = Router::new().with_route(Method::GET, "/hello/{name}", hello);
///
/// let found = router.lookup(Method::GET, "/hello/bob").unwrap();
/// assert_eq!(found.params["name"], "bob");
/// ```
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: vec![] }
    }
    pub fn with_route<H>(mut self, method: Method, template: &str, handler: H) -> Self
    where
        H: 'static + Handler,
    {
        self.routes.push(Route {
            method,
            segments: template.split('/').map(Segment::from_str).collect(),
            handler: Box::new(handler),
        });
        self
    }
    /// Find the handler for a method and path.
    ///
    /// A path that matches some template only under a different method
    /// is distinguished as `MethodNotAllowed` rather than `NotFound`.
    pub fn lookup(&self, method: Method, path: &str) -> Result<RouteMatch<'_>, RouteError> {
        let parts: Vec<&str> = path.split('/').collect();
        let mut path_matched = false;
        for route in &self.routes {
            if let Some(params) = route.matches_path(&parts) {
                if route.method == method {
                    return Ok(RouteMatch {
                        handler: route.handler.as_ref(),
                        params,
                    });
                }
                path_matched = true;
            }
        }
        if path_matched {
            Err(RouteError::MethodNotAllowed)
        } else {
            Err(RouteError::NotFound)
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::request::Request;
    use crate::response::Response;

    fn ok(_req: &Request, _params: &PathParams) -> Response {
        Response::new(200)
    }

    fn router() -> Router {
        Router::new()
            .with_route(Method::GET, "/", ok)
            .with_route(Method::GET, "/add/{a}/{b}", ok)
            .with_route(Method::POST, "/submitsomething", ok)
    }

    #[test]
    fn test_literal_match() {
        assert!(router().lookup(Method::GET, "/").is_ok());
    }

    #[test]
    fn test_placeholder_capture() {
        let router = router();
        let found = router.lookup(Method::GET, "/add/3/4").unwrap();
        assert_eq!(found.params["a"], "3");
        assert_eq!(found.params["b"], "4");
    }

    #[test]
    fn test_placeholder_requires_non_empty_segment() {
        assert_eq!(
            router().lookup(Method::GET, "/add//4").unwrap_err(),
            RouteError::NotFound
        );
    }

    #[test]
    fn test_segment_count_must_match() {
        assert_eq!(
            router().lookup(Method::GET, "/add/3").unwrap_err(),
            RouteError::NotFound
        );
        assert_eq!(
            router().lookup(Method::GET, "/add/3/4/5").unwrap_err(),
            RouteError::NotFound
        );
    }

    #[test]
    fn test_not_found() {
        assert_eq!(
            router().lookup(Method::GET, "/nope").unwrap_err(),
            RouteError::NotFound
        );
    }

    #[test]
    fn test_method_not_allowed() {
        assert_eq!(
            router().lookup(Method::POST, "/").unwrap_err(),
            RouteError::MethodNotAllowed
        );
        assert_eq!(
            router().lookup(Method::GET, "/submitsomething").unwrap_err(),
            RouteError::MethodNotAllowed
        );
    }

    #[test]
    fn test_literal_is_case_sensitive() {
        assert_eq!(
            router().lookup(Method::GET, "/Add/3/4").unwrap_err(),
            RouteError::NotFound
        );
    }

    #[test]
    fn test_registration_order_breaks_ties() {
        fn first(_req: &Request, _params: &PathParams) -> Response {
            Response::new(201)
        }
        fn second(_req: &Request, _params: &PathParams) -> Response {
            Response::new(202)
        }
        let router = Router::new()
            .with_route(Method::GET, "/x/{v}", first)
            .with_route(Method::GET, "/x/literal", second);
        let found = router.lookup(Method::GET, "/x/literal").unwrap();
        let response = found.handler.handle(&Request::default(), &found.params);
        assert_eq!(response.status_code, 201);
    }
}
