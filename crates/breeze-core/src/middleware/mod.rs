//! Middleware: request/response hooks around the responder
//!
//! The access logger runs here so it observes every response,
//! regardless of which responder produced it.

pub mod access_log;

pub use access_log::AccessLog;

use crate::request::Request;
use crate::response::Response;

/// Middleware trait - process request/response
pub trait Middleware: Send + Sync {
    /// Process request before the responder; a Some return short-circuits
    fn before(&self, req: &mut Request) -> Option<Response>;

    /// Process response after the responder
    fn after(&self, req: &Request, res: &mut Response);
}

/// Middleware chain
#[derive(Default)]
pub struct MiddlewareChain {
    middlewares: Vec<Box<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<M: Middleware + 'static>(&mut self, middleware: M) {
        self.middlewares.push(Box::new(middleware));
    }

    /// Run before middlewares, return early response if any
    pub fn run_before(&self, req: &mut Request) -> Option<Response> {
        for m in &self.middlewares {
            if let Some(res) = m.before(req) {
                return Some(res);
            }
        }
        None
    }

    /// Run after middlewares in reverse order
    pub fn run_after(&self, req: &Request, res: &mut Response) {
        for m in self.middlewares.iter().rev() {
            m.after(req, res);
        }
    }
}
