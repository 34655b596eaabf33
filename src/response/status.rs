//! Default HTTP status reason phrases.

/// Default reason phrase for a status code.
pub fn default(status_code: u16) -> String {
    let status = match status_code {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        411 => "Length Required",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        503 => "Service Unavailable",
        _ => "",
    };
    status.to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(default(200), "OK");
        assert_eq!(default(405), "Method Not Allowed");
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(default(299), "");
    }
}
