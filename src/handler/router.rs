//! Method dispatch
//!
//! Maps the request method onto a caller-supplied handler. No path routing;
//! handlers look at `Request::path` themselves.

use std::collections::HashMap;
use std::fmt;

use super::{Handler, Reply};
use crate::error::DispatchError;
use crate::http::{Request, Response};

/// Immutable method → handler table.
///
/// Method names are compared upper-cased, so `"get"` and `"GET"` refer to
/// the same entry.
#[derive(Default)]
pub struct Handlers {
    by_method: HashMap<String, Box<dyn Handler>>,
    fallback: Option<Box<dyn Handler>>,
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("methods", &self.methods())
            .field("fallback", &self.has_fallback())
            .finish()
    }
}

macro_rules! method_setters {
    ($($name:ident => $method:literal),* $(,)?) => {
        $(
            #[doc = concat!("Register the handler for `", $method, "` requests.")]
            #[must_use]
            pub fn $name<F, R>(self, handler: F) -> Self
            where
                F: Fn(&Request) -> R + 'static,
                R: Into<Reply>,
            {
                self.on($method, handler)
            }
        )*
    };
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    method_setters! {
        get => "GET",
        head => "HEAD",
        post => "POST",
        put => "PUT",
        delete => "DELETE",
        connect => "CONNECT",
        options => "OPTIONS",
        trace => "TRACE",
        patch => "PATCH",
    }

    /// Register a handler for an arbitrary method name.
    #[must_use]
    pub fn on<F, R>(self, method: &str, handler: F) -> Self
    where
        F: Fn(&Request) -> R + 'static,
        R: Into<Reply>,
    {
        self.handler(method, handler)
    }

    /// Register any [`Handler`] implementation for `method`.
    ///
    /// Registering the same method twice keeps the last handler.
    #[must_use]
    pub fn handler(mut self, method: &str, handler: impl Handler + 'static) -> Self {
        self.by_method
            .insert(normalize_method(method), Box::new(handler));
        self
    }

    /// Handler for every method without a specific entry.
    #[must_use]
    pub fn fallback<F, R>(mut self, handler: F) -> Self
    where
        F: Fn(&Request) -> R + 'static,
        R: Into<Reply>,
    {
        self.fallback = Some(Box::new(handler));
        self
    }

    /// Registered method names, sorted.
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.by_method.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }

    pub const fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.by_method.is_empty() && self.fallback.is_none()
    }

    fn lookup(&self, method: &str) -> Option<&dyn Handler> {
        self.by_method
            .get(&normalize_method(method))
            .or(self.fallback.as_ref())
            .map(|handler| &**handler)
    }

    /// Produce the response for one request.
    ///
    /// An unknown method yields `405` with an empty body. Handler panics are
    /// not caught here.
    pub fn dispatch(&self, request: &Request) -> Result<Response, DispatchError> {
        match self.lookup(request.method()) {
            Some(handler) => handler.handle(request).into_response(),
            None => Ok(Response::method_not_allowed()),
        }
    }
}

fn normalize_method(method: &str) -> String {
    method.trim().to_ascii_uppercase()
}
