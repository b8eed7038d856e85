//! HTTP server: listener lifecycle and the sequential serve loop
//!
//! hyper (HTTP/1.x) is the hosting runtime: it accepts the connection
//! bytes, parses the request line, and invokes the dispatcher once per
//! request. Connections are served inline, one at a time — each
//! response completes before the next accept. The listening socket is
//! the only process-wide resource: `bind` acquires it, `serve` consumes
//! the server and runs the loop, drop releases it.

use crate::middleware::{AccessLog, MiddlewareChain};
use crate::request::{Method, Request};
use crate::responder::{MethodFallback, PageResponder, Responder};
use crate::response::Response;
use crate::{Error, Result};

use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use std::convert::Infallible;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, warn};

/// Server configuration
///
/// No flags, no files, no environment lookup: the listen address is
/// fixed at construction and only overridable in source.
#[derive(Clone)]
pub struct ServerConfig {
    pub hostname: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hostname: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Resolve the configured hostname/port to a socket address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        (self.hostname.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| Error::InvalidAddress(format!("{}:{}", self.hostname, self.port)))
    }
}

/// Server state shared with the per-connection service
///
/// Dispatch is an explicit choice over {GET, OTHER}; the middleware
/// chain (access logging) runs around whichever responder is chosen.
/// The responders themselves are stateless, so nothing here mutates
/// across requests.
pub struct ServerState {
    get: Box<dyn Responder>,
    fallback: Box<dyn Responder>,
    middleware: MiddlewareChain,
}

impl ServerState {
    pub fn new() -> Self {
        let mut middleware = MiddlewareChain::new();
        middleware.add(AccessLog);
        Self {
            get: Box::new(PageResponder),
            fallback: Box::new(MethodFallback),
            middleware,
        }
    }

    /// Handle one request: dispatch by method, run middleware hooks
    pub fn handle(&self, mut req: Request) -> Response {
        if let Some(mut early) = self.middleware.run_before(&mut req) {
            self.middleware.run_after(&req, &mut early);
            return early;
        }

        let responder: &dyn Responder = match &req.method {
            Method::Get => self.get.as_ref(),
            Method::Other(_) => self.fallback.as_ref(),
        };

        let mut res = responder.respond(&req).unwrap_or_else(|err| {
            error!(path = %req.target(), error = %err, "responder failed");
            Response::internal_error("Internal Server Error")
        });

        self.middleware.run_after(&req, &mut res);
        res
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the listening socket
///
/// SO_REUSEADDR so restarts can rebind through TIME_WAIT; nonblocking
/// because tokio drives it.
pub fn create_listener(addr: &SocketAddr) -> std::io::Result<Socket> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.bind(&(*addr).into())?;
    socket.listen(128)?;
    socket.set_nonblocking(true)?;

    Ok(socket)
}

/// Convert a hyper request to our Request type
///
/// Only the request line matters to this server: the body is never
/// read, headers are carried for the library surface.
pub fn from_hyper_request<B>(req: &hyper::Request<B>, remote_addr: SocketAddr) -> Request {
    let method = Method::parse(req.method().as_str());
    let uri = req.uri();

    let mut request = Request::new(method, uri.path());
    request.query = uri.query().map(|q| q.to_string());
    request.remote_addr = Some(remote_addr);

    for (name, value) in req.headers() {
        if let Ok(v) = value.to_str() {
            request.headers.push((name.to_string(), v.to_string()));
        }
    }

    request
}

/// Convert our Response to a hyper response
pub fn to_hyper_response(res: Response) -> hyper::Response<Full<Bytes>> {
    let mut builder = hyper::Response::builder().status(res.status.as_u16());

    for (name, value) in &res.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    builder.body(Full::new(res.body)).unwrap()
}

/// The HTTP server: an owned listener plus the dispatch state
pub struct Server {
    listener: TcpListener,
    state: Arc<ServerState>,
}

impl Server {
    /// Acquire the listening socket. Requires a running tokio runtime.
    pub fn bind(config: &ServerConfig) -> Result<Self> {
        let addr = config.socket_addr()?;
        let socket = create_listener(&addr)?;
        let listener = TcpListener::from_std(socket.into())?;

        Ok(Self {
            listener,
            state: Arc::new(ServerState::new()),
        })
    }

    /// The address the listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Run the accept loop until the process is interrupted
    ///
    /// Connections are served sequentially: a slow client holds up the
    /// next accept. Per-connection protocol and I/O failures are
    /// hyper's to recover from; they are logged and the loop continues.
    /// Accept failures propagate.
    pub async fn serve(self) -> Result<()> {
        loop {
            let (stream, remote_addr) = self.listener.accept().await?;
            stream.set_nodelay(true).ok();
            let io = TokioIo::new(stream);

            let state = Arc::clone(&self.state);
            let service = service_fn(move |req| {
                let state = Arc::clone(&state);
                async move {
                    let request = from_hyper_request(&req, remote_addr);
                    let response = state.handle(request);
                    Ok::<_, Infallible>(to_hyper_response(response))
                }
            });

            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                warn!(client = %remote_addr, error = %err, "connection error");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestBuilder;
    use crate::response::StatusCode;

    #[test]
    fn test_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.hostname, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.socket_addr().is_ok());
    }

    #[test]
    fn test_handle_get_renders_page() {
        let state = ServerState::new();
        let req = RequestBuilder::new(Method::Get, "/foo/bar").query("x=1").build();

        let res = state.handle(req);
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.content_type(), Some("text/html"));
        let body = res.body_string().unwrap();
        assert!(body.contains("<p><strong>Path:</strong> /foo/bar?x=1</p>"));
    }

    #[test]
    fn test_handle_non_get_falls_back() {
        let state = ServerState::new();
        let req = RequestBuilder::new(Method::parse("POST"), "/").build();

        let res = state.handle(req);
        assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.header("allow"), Some("GET"));
    }

    #[test]
    fn test_from_hyper_request() {
        let hyper_req = hyper::Request::builder()
            .method("GET")
            .uri("/foo/bar?x=1")
            .header("host", "localhost")
            .body(())
            .unwrap();

        let req = from_hyper_request(&hyper_req, "127.0.0.1:9999".parse().unwrap());
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.path, "/foo/bar");
        assert_eq!(req.query.as_deref(), Some("x=1"));
        assert_eq!(req.target(), "/foo/bar?x=1");
        assert_eq!(req.header("host"), Some("localhost"));
    }

    #[test]
    fn test_to_hyper_response() {
        let res = Response::html("<p>hi</p>");
        let hyper_res = to_hyper_response(res);
        assert_eq!(hyper_res.status(), hyper::StatusCode::OK);
        assert_eq!(
            hyper_res.headers().get("content-type").unwrap(),
            "text/html"
        );
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let config = ServerConfig {
            hostname: "127.0.0.1".to_string(),
            port: 0,
        };
        let server = Server::bind(&config).unwrap();
        let addr = server.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
    }
}
