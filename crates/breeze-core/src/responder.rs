//! Responders: the per-request units of the server
//!
//! Dispatch is an explicit choice over {GET, OTHER}: GET goes to
//! `PageResponder`, every other method to `MethodFallback`. Both sides
//! of the dispatch implement the same trait.

use crate::clock;
use crate::error::Result;
use crate::page::render_page;
use crate::request::Request;
use crate::response::Response;

/// A unit of code invoked once per inbound request to produce a response
pub trait Responder: Send + Sync {
    fn respond(&self, req: &Request) -> Result<Response>;
}

/// GET responder: renders the page for any target
pub struct PageResponder;

impl Responder for PageResponder {
    fn respond(&self, req: &Request) -> Result<Response> {
        let html = render_page(&req.target(), &clock::timestamp())?;
        Ok(Response::html(html))
    }
}

/// Fallback for every non-GET method: 405 with an Allow header
pub struct MethodFallback;

impl Responder for MethodFallback {
    fn respond(&self, _req: &Request) -> Result<Response> {
        Ok(Response::method_not_allowed())
    }
}
