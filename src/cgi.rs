//! One-shot CGI front end.
//!
//! The original deployment model: the web server spawns one process per
//! request, parameters arrive through `QUERY_STRING` (or stdin for a POST
//! form body), and the response is written to stdout as a `Content-type`
//! line, a blank line, and the HTML body. Any failure propagates and the
//! process exits non-zero with no error page.

use std::io::{Read, Write};

use crate::{Error, FileSink, FsRepository, PageRenderer, PageRequest, Result, SiteConfig};

/// Read the raw parameter string the way a CGI host hands it over.
fn read_raw_query() -> Result<String> {
    let method = std::env::var("REQUEST_METHOD").unwrap_or_default();
    if method == "POST" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .map_err(|e| Error::Other(format!("failed to read form body: {}", e)))?;
        Ok(body)
    } else {
        Ok(std::env::var("QUERY_STRING").unwrap_or_default())
    }
}

/// Handle exactly one request and write the response to stdout.
pub fn run_cgi(config: SiteConfig) -> Result<()> {
    let raw = read_raw_query()?;
    let req = PageRequest::from_query(&raw);

    let repository = FsRepository::new(&config);
    let sink = FileSink::new(&config.submission_log);
    let renderer = PageRenderer::new(config, repository, sink);

    let page = renderer.render(&req)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(b"Content-type: text/html\n\n")
        .and_then(|_| out.write_all(page.body.as_bytes()))
        .and_then(|_| out.flush())
        .map_err(|e| Error::Other(format!("failed to write response: {}", e)))?;

    Ok(())
}
