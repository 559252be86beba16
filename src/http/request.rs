//! Request view handed to handlers.

use std::collections::HashMap;
use std::net::SocketAddr;

use http_body_util::BodyExt;
use hyper::body::{Bytes, Incoming};
use serde::de::DeserializeOwned;

use crate::error::DispatchError;

/// One parsed HTTP request.
///
/// Built once per connection by the server and passed to the handler by
/// reference; handlers cannot modify it.
#[derive(Debug, Clone)]
pub struct Request {
    client: SocketAddr,
    method: String,
    path: String,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Request {
    pub fn new(
        client: SocketAddr,
        method: impl Into<String>,
        path: impl Into<String>,
        headers: HashMap<String, String>,
        body: impl Into<Bytes>,
    ) -> Self {
        Self {
            client,
            method: method.into(),
            path: path.into(),
            headers,
            body: body.into(),
        }
    }

    /// Read the full request off the wire, including the body.
    ///
    /// Header names are lower-case (as hyper parses them). Repeated headers
    /// are joined with `", "`.
    pub async fn read(
        req: hyper::Request<Incoming>,
        client: SocketAddr,
    ) -> Result<Self, DispatchError> {
        let (parts, body) = req.into_parts();

        let mut headers: HashMap<String, String> = HashMap::with_capacity(parts.headers.len());
        for (name, value) in &parts.headers {
            let value = String::from_utf8_lossy(value.as_bytes());
            headers
                .entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert_with(|| value.into_owned());
        }

        let body = body.collect().await?.to_bytes();

        Ok(Self {
            client,
            method: parts.method.as_str().to_string(),
            path: parts.uri.to_string(),
            headers,
            body,
        })
    }

    /// Peer address of the connection (usually the reverse proxy).
    pub const fn client(&self) -> SocketAddr {
        self.client
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Raw request target, query string included.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as UTF-8, or `None` if it is not valid UTF-8.
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}
