// Server loop module
// Sequential accept loop: one connection is served fully before the next accept

use tokio::net::TcpListener;

use super::connection::serve_connection;
use super::signal::ShutdownHandle;
use super::ServerOptions;
use crate::handler::Handlers;
use crate::logger;

/// Accept and serve connections until `shutdown` fires.
///
/// Shutdown is only observed between connections; a connection that is
/// already being served runs to completion. Accept errors are logged and the
/// loop keeps going.
pub async fn run_accept_loop(
    listener: &TcpListener,
    handlers: &Handlers,
    options: &ServerOptions,
    shutdown: &ShutdownHandle,
) {
    while !shutdown.is_requested() {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        serve_connection(stream, peer_addr, handlers, options).await;
                    }
                    Err(e) => {
                        logger::log_warning(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.wait() => break,
        }
    }
}
