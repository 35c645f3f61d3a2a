//! Threaded HTTP front end.
//!
//! A small `tiny_http` loop for running the site as a standalone process
//! instead of behind a CGI host. Worker threads share one listener; each
//! request runs the same render pipeline as the CGI front end. Unlike CGI,
//! render failures are mapped to plain-text 404/500 responses so a missing
//! comic does not kill the process.

use std::io::Read;
use std::sync::Arc;
use std::thread;

use tiny_http::{Method, Response, Server};

use crate::{
    Error, FileSink, FsRepository, PageRenderer, PageRequest, Result, SiteConfig,
};

/// HTTP status for a render failure.
///
/// Lookup failures are the client's problem; everything else is ours.
fn status_for(err: &Error) -> u16 {
    match err {
        Error::ComicNotFound(_)
        | Error::TranscriptNotFound(_)
        | Error::EmptyArchive
        | Error::InvalidId(_) => 404,
        _ => 500,
    }
}

/// A bound site server ready to accept requests
pub struct SiteServer {
    server: Arc<Server>,
    renderer: Arc<PageRenderer<FsRepository, FileSink>>,
}

impl SiteServer {
    /// Bind the listener and build the render pipeline.
    ///
    /// Pass a port of `0` to let the OS pick one; `addr` reports the actual
    /// binding.
    pub fn bind(config: SiteConfig, addr: &str) -> Result<SiteServer> {
        let server = Server::http(addr)
            .map_err(|e| Error::HttpError(format!("failed to bind {}: {}", addr, e)))?;

        let repository = FsRepository::new(&config);
        let sink = FileSink::new(&config.submission_log);
        let renderer = PageRenderer::new(config, repository, sink);

        Ok(SiteServer {
            server: Arc::new(server),
            renderer: Arc::new(renderer),
        })
    }

    /// The address the listener is bound to.
    pub fn addr(&self) -> String {
        self.server.server_addr().to_string()
    }

    /// Accept requests until the socket dies.
    ///
    /// Spawns one worker per CPU; all workers pull from the shared listener.
    pub fn run(&self) {
        log::info!("listening on {}", self.addr());
        let workers = num_cpus::get().max(1);
        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let server = self.server.clone();
            let renderer = self.renderer.clone();
            handles.push(thread::spawn(move || worker_loop(&server, &renderer)));
        }
        for handle in handles {
            let _ = handle.join();
        }
    }
}

fn worker_loop(server: &Server, renderer: &PageRenderer<FsRepository, FileSink>) {
    loop {
        let request = match server.recv() {
            Ok(request) => request,
            Err(e) => {
                log::warn!("listener error: {}", e);
                break;
            }
        };
        handle_request(renderer, request);
    }
}

fn handle_request(renderer: &PageRenderer<FsRepository, FileSink>, mut request: tiny_http::Request) {
    let mut raw = request
        .url()
        .splitn(2, '?')
        .nth(1)
        .unwrap_or("")
        .to_string();

    // POST form bodies are appended after the query string; the first
    // occurrence of a parameter wins, so the query takes precedence.
    if request.method() == &Method::Post {
        let mut body = String::new();
        if request.as_reader().read_to_string(&mut body).is_ok() && !body.is_empty() {
            if !raw.is_empty() {
                raw.push('&');
            }
            raw.push_str(&body);
        }
    }

    let page_request = PageRequest::from_query(&raw);
    let html_header = "Content-Type: text/html; charset=utf-8"
        .parse::<tiny_http::Header>()
        .unwrap();

    let outcome = match renderer.render(&page_request) {
        Ok(page) => request.respond(Response::from_string(page.body).with_header(html_header)),
        Err(e) => {
            log::warn!("render failed: {}", e);
            request.respond(
                Response::from_string(e.to_string()).with_status_code(status_for(&e)),
            )
        }
    };

    if let Err(e) = outcome {
        log::warn!("failed to write response: {}", e);
    }
}

/// Bind and run until the process is killed.
pub fn serve(config: SiteConfig, addr: &str) -> Result<()> {
    let server = SiteServer::bind(config, addr)?;
    server.run();
    Ok(())
}
