// Server module entry point
// Binding, the blocking serve call, signal-driven shutdown

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the file is mounted as server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::net::{SocketAddr, ToSocketAddrs};

use crate::error::{Error, Result};
use crate::handler::Handlers;
use crate::logger;

pub use listener::create_listener;
pub use signal::ShutdownHandle;

/// Knobs for the ambient behaviour of a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    /// Write one access log line per answered request.
    pub access_log: bool,
    /// `combined`, `common`, `json`, or a custom `$variable` pattern.
    pub access_log_format: String,
    /// Install the SIGTERM/SIGINT listener when serving.
    pub handle_signals: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            access_log: true,
            access_log_format: "combined".to_string(),
            handle_signals: true,
        }
    }
}

/// A bound, not yet running, server.
#[derive(Debug)]
pub struct Server {
    listener: std::net::TcpListener,
    local_addr: SocketAddr,
    handlers: Handlers,
    options: ServerOptions,
    shutdown: ShutdownHandle,
}

impl Server {
    /// Bind `addr` right away; the first resolved address is used.
    pub fn bind(addr: impl ToSocketAddrs, handlers: Handlers) -> Result<Self> {
        let addr = addr
            .to_socket_addrs()
            .map_err(|e| Error::Address(e.to_string()))?
            .next()
            .ok_or_else(|| Error::Address("address resolved to nothing".to_string()))?;

        let listener = create_listener(addr).map_err(|source| Error::Bind { addr, source })?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            listener,
            local_addr,
            handlers,
            options: ServerOptions::default(),
            shutdown: ShutdownHandle::new(),
        })
    }

    #[must_use]
    pub fn with_options(mut self, options: ServerOptions) -> Self {
        self.options = options;
        self
    }

    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Handle that stops `serve` the same way SIGTERM does.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Serve on the calling thread until shutdown is requested.
    ///
    /// Handler failures never make this return; only runtime setup errors do.
    pub fn serve(self) -> Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        runtime.block_on(self.run())
    }

    async fn run(self) -> Result<()> {
        let listener = tokio::net::TcpListener::from_std(self.listener)?;

        if self.options.handle_signals {
            signal::start_signal_handler(self.shutdown.clone())?;
        }

        logger::log_server_start(
            &self.local_addr,
            &self.handlers.methods(),
            self.handlers.has_fallback(),
        );

        server_loop::run_accept_loop(&listener, &self.handlers, &self.options, &self.shutdown)
            .await;

        drop(listener);
        logger::log_shutdown(&self.local_addr);
        Ok(())
    }
}
