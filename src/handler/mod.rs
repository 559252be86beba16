//! Request handler module
//!
//! Handler trait, handler results, and the per-method dispatch table.

pub mod reply;
pub mod router;

use crate::http::Request;

pub use reply::Reply;
pub use router::Handlers;

/// Something that turns one request into one reply.
///
/// Implemented for every `Fn(&Request) -> R` where `R: Into<Reply>`, so plain
/// functions and closures work directly.
pub trait Handler {
    fn handle(&self, request: &Request) -> Reply;
}

impl<F, R> Handler for F
where
    F: Fn(&Request) -> R,
    R: Into<Reply>,
{
    fn handle(&self, request: &Request) -> Reply {
        self(request).into()
    }
}
