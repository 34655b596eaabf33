//! The demo application: five handlers and their route table.
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;

use crate::handler::PathParams;
use crate::request::{Method, Request};
use crate::response::Response;
use crate::router::Router;

/// Build the demo route table. Immutable after startup.
pub fn routes() -> Router {
    Router::new()
        .with_route(Method::GET, "/", welcome)
        .with_route(Method::GET, "/status", status)
        .with_route(Method::GET, "/getuserinfo", user_info)
        .with_route(Method::GET, "/add/{a}/{b}", add)
        .with_route(Method::POST, "/submitsomething", submit)
}

/// `GET /` - fixed greeting.
fn welcome(_request: &Request, _params: &PathParams) -> Response {
    Response::new(200).with_payload(json!({"message": "Welcome to looplite!"}))
}

#[derive(Debug, Serialize)]
struct Status {
    status: &'static str,
    timestamp: String,
}

/// `GET /status` - liveness check with the current UTC time.
fn status(_request: &Request, _params: &PathParams) -> Response {
    let body = Status {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    };
    match serde_json::to_value(&body) {
        Ok(payload) => Response::new(200).with_payload(payload),
        Err(_) => Response::error(500, "Internal Server Error"),
    }
}

/// `GET /getuserinfo?user_id=..&username=..` - echo both query params,
/// 400 naming whichever are missing.
fn user_info(request: &Request, _params: &PathParams) -> Response {
    let mut missing = vec![];
    for name in &["user_id", "username"] {
        if request.query_param(name).is_none() {
            missing.push(*name);
        }
    }
    if !missing.is_empty() {
        return Response::error(
            400,
            &format!("missing query parameter(s): {}", missing.join(", ")),
        );
    }
    Response::new(200).with_payload(json!({
        "user_id": request.query_param("user_id"),
        "username": request.query_param("username"),
    }))
}

/// `GET /add/{a}/{b}` - numeric sum of both path parameters.
///
/// Integers stay integers; if either side only parses as floating
/// point, or the integer sum overflows i64, the sum is floating
/// point. Unparsable input is a 400.
fn add(_request: &Request, params: &PathParams) -> Response {
    let a = &params["a"];
    let b = &params["b"];
    if let (Ok(a), Ok(b)) = (a.parse::<i64>(), b.parse::<i64>()) {
        if let Some(sum) = a.checked_add(b) {
            return Response::new(200).with_payload(json!({"a": a, "b": b, "sum": sum}));
        }
    }
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(a), Ok(b)) => Response::new(200).with_payload(json!({"a": a, "b": b, "sum": a + b})),
        _ => Response::error(400, "parameters a and b must be numeric"),
    }
}

/// `POST /submitsomething` - echo an opaque text payload and its byte
/// length; an empty body is a 400.
fn submit(request: &Request, _params: &PathParams) -> Response {
    if request.body.is_empty() {
        return Response::error(400, "expected a non-empty request body");
    }
    Response::new(200).with_payload(json!({
        "received": request.body_text(),
        "length": request.body.len(),
    }))
}
