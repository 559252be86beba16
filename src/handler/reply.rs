//! Handler results and their normalization.

use std::fmt::Display;

use hyper::body::Bytes;
use hyper::StatusCode;

use crate::error::DispatchError;
use crate::http::Response;

/// What a handler hands back before the dispatcher normalizes it.
///
/// Handlers rarely name this type; they return `()`, a status code, a body,
/// a `Response`, or a `Result` of any of those, and the `From` impls below
/// pick the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `200 OK`, empty body.
    Default,
    /// Given status, empty body, no headers.
    Status(u16),
    /// A complete response, sent as is.
    Full(Response),
    /// The handler gave up; the connection is dropped without a response.
    Failed(String),
}

impl Reply {
    /// Collapse into the single response shape the server writes.
    pub fn into_response(self) -> Result<Response, DispatchError> {
        match self {
            Self::Default => Ok(Response::default()),
            Self::Status(status) => Ok(Response::status(status)),
            Self::Full(response) => Ok(response),
            Self::Failed(message) => Err(DispatchError::Handler(message)),
        }
    }
}

impl From<()> for Reply {
    fn from((): ()) -> Self {
        Self::Default
    }
}

impl From<u16> for Reply {
    fn from(status: u16) -> Self {
        Self::Status(status)
    }
}

impl From<StatusCode> for Reply {
    fn from(status: StatusCode) -> Self {
        Self::Status(status.as_u16())
    }
}

impl From<Response> for Reply {
    fn from(response: Response) -> Self {
        Self::Full(response)
    }
}

// A bare body is served as HTML with status 200.
impl From<Bytes> for Reply {
    fn from(body: Bytes) -> Self {
        Self::Full(Response::html(body))
    }
}

impl From<Vec<u8>> for Reply {
    fn from(body: Vec<u8>) -> Self {
        Self::Full(Response::html(body))
    }
}

impl From<&str> for Reply {
    fn from(body: &str) -> Self {
        Self::Full(Response::html(Bytes::copy_from_slice(body.as_bytes())))
    }
}

impl From<String> for Reply {
    fn from(body: String) -> Self {
        Self::Full(Response::html(body))
    }
}

impl<B: Into<Bytes>> From<(u16, B)> for Reply {
    fn from((status, body): (u16, B)) -> Self {
        Self::Full(Response::html(body).with_status(status))
    }
}

impl<T, E> From<Result<T, E>> for Reply
where
    T: Into<Self>,
    E: Display,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(reply) => reply.into(),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_is_bare_ok() {
        let resp = Reply::from(()).into_response().unwrap();
        assert_eq!(resp, Response::default());
    }

    #[test]
    fn test_status_only_has_empty_body() {
        let resp = Reply::from(404_u16).into_response().unwrap();
        assert_eq!(resp.status, 404);
        assert!(resp.body.is_empty());
        assert!(resp.headers.is_empty());

        let resp = Reply::from(StatusCode::NO_CONTENT).into_response().unwrap();
        assert_eq!(resp.status, 204);
    }

    #[test]
    fn test_body_shapes_are_html() {
        let resp = Reply::from("<p>ok</p>").into_response().unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.header("Content-Type"), Some("text/html"));

        let resp = Reply::from((418_u16, b"teapot".to_vec())).into_response().unwrap();
        assert_eq!(resp.status, 418);
        assert_eq!(resp.body, Bytes::from_static(b"teapot"));
    }

    #[test]
    fn test_borrowed_str_body_is_copied() {
        let name = String::from("ada");
        let greeting = format!("<p>{name}</p>");
        let reply = Reply::from(greeting.as_str());
        drop(greeting);

        let resp = reply.into_response().unwrap();
        assert_eq!(resp.body, Bytes::from_static(b"<p>ada</p>"));
        assert_eq!(resp.header("Content-Type"), Some("text/html"));
    }

    #[test]
    fn test_full_response_passes_through() {
        let original = Response::typed("text/plain", "x").with_status(202);
        let resp = Reply::from(original.clone()).into_response().unwrap();
        assert_eq!(resp, original);
    }

    #[test]
    fn test_result_error_fails_response() {
        let result: Result<(), String> = Err("database is locked".to_string());
        let err = Reply::from(result).into_response().unwrap_err();
        assert!(matches!(err, DispatchError::Handler(ref m) if m == "database is locked"));

        let ok: Result<u16, String> = Ok(201);
        assert_eq!(Reply::from(ok), Reply::Status(201));
    }
}
