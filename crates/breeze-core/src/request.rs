//! HTTP Request types
//!
//! The server dispatches over the set {GET, OTHER}: GET renders the
//! page, everything else gets the method fallback. `Method` keeps the
//! original method name so access logs stay faithful.

use smallvec::SmallVec;
use std::net::SocketAddr;

/// HTTP method as seen by the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    /// Any non-GET method, carrying its uppercased name
    Other(String),
}

impl Method {
    /// Classify a method name. Total: unknown methods are `Other`.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("GET") {
            Method::Get
        } else {
            Method::Other(s.to_ascii_uppercase())
        }
    }

    /// The wire-format method name
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Other(name) => name,
        }
    }

    pub fn is_get(&self) -> bool {
        matches!(self, Method::Get)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// HTTP Request
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method
    pub method: Method,
    /// Request path (without query string)
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// Request headers (stack-allocated for small header counts)
    pub headers: SmallVec<[(String, String); 16]>,
    /// Client socket address, when known
    pub remote_addr: Option<SocketAddr>,
}

impl Request {
    /// Create a new request
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            headers: SmallVec::new(),
            remote_addr: None,
        }
    }

    /// The full request target: path plus `?query` when present.
    ///
    /// This is the string the page displays and the access log records,
    /// exactly as the client sent it.
    pub fn target(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }

    /// Get a header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Builder for constructing requests
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    /// Create a new builder
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request: Request::new(method, path),
        }
    }

    /// Set query string
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.request.query = Some(query.into());
        self
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.push((name.into(), value.into()));
        self
    }

    /// Set the client address
    pub fn remote_addr(mut self, addr: SocketAddr) -> Self {
        self.request.remote_addr = Some(addr);
        self
    }

    /// Build the request
    pub fn build(self) -> Request {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse() {
        assert_eq!(Method::parse("GET"), Method::Get);
        assert_eq!(Method::parse("get"), Method::Get);
        assert_eq!(Method::parse("POST"), Method::Other("POST".to_string()));
        assert_eq!(Method::parse("brew"), Method::Other("BREW".to_string()));
        assert!(!Method::parse("DELETE").is_get());
    }

    #[test]
    fn test_target_without_query() {
        let req = RequestBuilder::new(Method::Get, "/foo/bar").build();
        assert_eq!(req.target(), "/foo/bar");
    }

    #[test]
    fn test_target_with_query() {
        let req = RequestBuilder::new(Method::Get, "/foo/bar")
            .query("x=1")
            .build();
        assert_eq!(req.target(), "/foo/bar?x=1");
    }

    #[test]
    fn test_request_header() {
        let req = RequestBuilder::new(Method::Get, "/")
            .header("Content-Type", "text/plain")
            .build();

        assert_eq!(req.header("content-type"), Some("text/plain"));
        assert_eq!(req.header("CONTENT-TYPE"), Some("text/plain"));
        assert_eq!(req.header("accept"), None);
    }
}
