//! Error types for the server and the dispatcher.

use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the caller of [`crate::serve`] and friends.
#[derive(Error, Debug)]
pub enum Error {
    /// The listener could not be bound (port in use, permission denied, ...).
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// The address we tried to bind.
        addr: SocketAddr,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },

    /// The bind address did not resolve to any socket address.
    #[error("Invalid address: {0}")]
    Address(String),

    /// The runtime or the signal listener could not be set up.
    #[error("Runtime error: {0}")]
    Runtime(#[from] io::Error),

    /// Settings could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Log files could not be opened.
    #[error("Logger error: {0}")]
    Logger(#[source] io::Error),
}

/// Failures that abort a single response.
///
/// These never reach the accept loop; the connection layer logs them and
/// closes the affected connection.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The handler reported a failure through `Err`.
    #[error("Handler failed: {0}")]
    Handler(String),

    /// The handler panicked.
    #[error("Handler panicked: {0}")]
    HandlerPanicked(String),

    /// The handler produced something that is not a valid HTTP response.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Reading the request body failed.
    #[error("Failed to read request body: {0}")]
    Body(#[from] hyper::Error),
}
