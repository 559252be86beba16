// Connection module
// Serves exactly one request on one accepted TCP connection

use std::any::Any;
use std::net::SocketAddr;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use super::ServerOptions;
use crate::error::DispatchError;
use crate::handler::Handlers;
use crate::http::Request;
use crate::logger::{self, AccessLogEntry};

/// Serve one connection to completion.
///
/// Keep-alive is off, so the connection carries a single request. Any
/// failure (bad framing, handler error, handler panic) is logged and only
/// closes this connection.
pub async fn serve_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    handlers: &Handlers,
    options: &ServerOptions,
) {
    let io = TokioIo::new(stream);

    let mut builder = http1::Builder::new();
    builder.keep_alive(false);

    let conn = builder.serve_connection(
        io,
        service_fn(|req| respond(req, peer_addr, handlers, options)),
    );

    if let Err(err) = conn.await {
        // Service errors were already logged with request context
        if !err.is_user() {
            logger::log_connection_error(&peer_addr, &err);
        }
    }
}

async fn respond(
    req: hyper::Request<Incoming>,
    peer_addr: SocketAddr,
    handlers: &Handlers,
    options: &ServerOptions,
) -> Result<hyper::Response<Full<Bytes>>, DispatchError> {
    let started = Instant::now();
    let request_line = format!("{} {}", req.method(), req.uri());

    let request = Request::read(req, peer_addr).await.inspect_err(|e| {
        logger::log_error(&format!("{peer_addr} \"{request_line}\": {e}"));
    })?;

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| handlers.dispatch(&request)))
        .map_err(|payload| DispatchError::HandlerPanicked(panic_message(payload.as_ref())))
        .and_then(|result| result)
        .and_then(|response| {
            let status = response.status;
            let body_bytes = response.body.len();
            response.into_hyper().map(|r| (r, status, body_bytes))
        });

    match outcome {
        Ok((response, status, body_bytes)) => {
            if options.access_log {
                let mut entry = AccessLogEntry::from_request(&request);
                entry.status = status;
                entry.body_bytes = body_bytes;
                entry.request_time_us =
                    u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
                logger::log_access(&entry, &options.access_log_format);
            }
            Ok(response)
        }
        Err(e) => {
            logger::log_error(&format!("{peer_addr} \"{request_line}\": {e}"));
            Err(e)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_payloads() {
        let static_payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(static_payload.as_ref()), "boom");

        let owned_payload: Box<dyn Any + Send> = Box::new(String::from("bad state"));
        assert_eq!(panic_message(owned_payload.as_ref()), "bad state");

        let other_payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(other_payload.as_ref()), "unknown panic payload");
    }
}
