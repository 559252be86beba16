//! HTTP request/response shapes seen by handler code.
//!
//! Wire framing stays with hyper; these types are the thin programming-facing
//! view over it.

pub mod request;
pub mod response;

pub use request::Request;
pub use response::Response;
