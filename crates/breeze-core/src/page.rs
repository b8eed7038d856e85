//! The rendered page
//!
//! Every GET request gets the same document, parameterized by the
//! request target and a timestamp. Rendering goes through an askama
//! template so the client-supplied target is HTML-escaped on output
//! rather than spliced in verbatim.

use askama::Template;

use crate::error::Result;

/// The single page this server knows how to serve
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    /// Request target, exactly as the client sent it
    pub target: &'a str,
    /// Render-time wall-clock timestamp
    pub time: &'a str,
}

/// Render the page for a request target at a given time
pub fn render_page(target: &str, time: &str) -> Result<String> {
    let page = PageTemplate { target, time };
    Ok(page.render()?)
}
