//! breeze-core: a minimal HTTP page server
//!
//! Serves one page: every GET request gets a static HTML document
//! embedding the request target and the current wall-clock time, and
//! every handled request produces one access-log line on stdout.
//! Non-GET methods fall through to an explicit 405 responder.
//!
//! The hosting runtime is tokio + hyper (HTTP/1.x). Connections are
//! served sequentially: each one is fully handled before the next
//! accept.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod clock;
pub mod error;
pub mod middleware;
pub mod page;
pub mod request;
pub mod responder;
pub mod response;
pub mod server;

// Re-exports
pub use clock::{timestamp, TIMESTAMP_FORMAT};
pub use error::{Error, Result};
pub use request::{Method, Request, RequestBuilder};
pub use response::{Response, ResponseBuilder, StatusCode};

pub use middleware::{AccessLog, Middleware, MiddlewareChain};
pub use responder::{MethodFallback, PageResponder, Responder};

pub use server::{Server, ServerConfig, ServerState};
pub use server::{create_listener, from_hyper_request, to_hyper_response};
