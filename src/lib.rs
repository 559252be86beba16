//! Stand up a minimal HTTP handler behind a reverse proxy.
//!
//! Requests are dispatched by method to caller-supplied functions, one
//! connection at a time, until SIGTERM (or SIGINT) arrives:
//!
//! ```no_run
//! use httpdrone::{Handlers, Reply, Request};
//!
//! fn handle_get(request: &Request) -> Reply {
//!     if request.path() != "/example" {
//!         return Reply::Status(404);
//!     }
//!     Reply::from("<html><body>Here you go!</body></html>")
//! }
//!
//! httpdrone::serve(("localhost", 1337), Handlers::new().get(handle_get))?;
//! # Ok::<(), httpdrone::Error>(())
//! ```
//!
//! Concurrency, TLS, slow clients, body limits and routing beyond the method
//! are left to the proxy in front.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

use std::net::ToSocketAddrs;

pub use error::{DispatchError, Error, Result};
pub use handler::{Handler, Handlers, Reply};
pub use http::{Request, Response};
pub use server::{Server, ServerOptions, ShutdownHandle};

/// Bind `addr` and serve `handlers` until a termination signal arrives.
pub fn serve(addr: impl ToSocketAddrs, handlers: Handlers) -> Result<()> {
    Server::bind(addr, handlers)?.serve()
}

/// Like [`serve`], with explicit [`ServerOptions`].
pub fn serve_with(
    addr: impl ToSocketAddrs,
    handlers: Handlers,
    options: ServerOptions,
) -> Result<()> {
    Server::bind(addr, handlers)?.with_options(options).serve()
}
