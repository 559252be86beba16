//! Response value built by handlers and serialized by the server.

use std::collections::HashMap;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use hyper::StatusCode;

use crate::error::DispatchError;

const HTML_CONTENT_TYPE: &str = "text/html";

/// Status, headers and body of one HTTP response.
///
/// `Response::default()` is a bare `200 OK` with no headers and no body.
/// Header names are stored lower-case, so setting a header twice under
/// different spellings keeps only the last value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }
}

impl Response {
    /// Empty response with the given status.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// `200 OK` with an HTML body.
    pub fn html(body: impl Into<Bytes>) -> Self {
        Self::typed(HTML_CONTENT_TYPE, body)
    }

    /// `200 OK` with the given `Content-Type` and body.
    pub fn typed(content_type: &str, body: impl Into<Bytes>) -> Self {
        Self::default()
            .with_header("Content-Type", content_type)
            .with_body(body)
    }

    /// Fallback sent when no handler exists for the request method.
    pub fn method_not_allowed() -> Self {
        Self::status(StatusCode::METHOD_NOT_ALLOWED.as_u16())
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut name = name.into();
        name.make_ascii_lowercase();
        self.headers.insert(name, value.into());
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Convert into a hyper response.
    ///
    /// A status outside `200..=999` or a header that is not valid HTTP
    /// aborts the response instead of being patched up. A `1xx` code cannot
    /// be a final response.
    pub fn into_hyper(self) -> Result<hyper::Response<Full<Bytes>>, DispatchError> {
        let status = StatusCode::from_u16(self.status)
            .ok()
            .filter(|status| !status.is_informational())
            .ok_or_else(|| {
                DispatchError::InvalidResponse(format!("status code {} out of range", self.status))
            })?;

        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                DispatchError::InvalidResponse(format!("header name {name:?}: {e}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                DispatchError::InvalidResponse(format!("header {name:?} value: {e}"))
            })?;
            headers.insert(header_name, header_value);
        }

        let mut response = hyper::Response::new(Full::new(self.body));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}
