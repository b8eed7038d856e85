//! Access logging middleware
//!
//! One line per handled request on stdout:
//!
//! ```text
//! [2026-08-07 14:03:22] 127.0.0.1:51432 "GET /foo/bar?x=1 HTTP/1.1" 200
//! ```
//!
//! The line format is part of the server's observable contract, so it
//! is written with `println!` rather than through the diagnostic
//! tracing layer. Write failures on stdout are not caught.

use crate::clock;
use crate::request::Request;
use crate::response::{Response, StatusCode};

use super::Middleware;

/// Access logger: runs in the `after` hook for every response
#[derive(Default)]
pub struct AccessLog;

impl AccessLog {
    /// Format one access-log line
    pub fn format_line(timestamp: &str, req: &Request, status: StatusCode) -> String {
        let client = req
            .remote_addr
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "[{}] {} \"{} {} HTTP/1.1\" {}",
            timestamp,
            client,
            req.method,
            req.target(),
            status.as_u16()
        )
    }
}

impl Middleware for AccessLog {
    fn before(&self, _req: &mut Request) -> Option<Response> {
        None
    }

    fn after(&self, req: &Request, res: &mut Response) {
        println!("{}", Self::format_line(&clock::timestamp(), req, res.status));
    }
}
