//! Stripserve
//!
//! A small web-comic page server: it resolves a comic image and its
//! transcript, substitutes both into an on-disk HTML template, and emits the
//! result. Proposed transcript edits arrive as form submissions and are
//! appended to a flat JSON log.
//!
//! # Features
//!
//! - **CGI front end** (always available): one request per process, header
//!   and body on stdout
//! - **HTTP front end** (`server`, default): threaded `tiny_http` loop
//! - **Injectable back ends**: comic lookup and submission recording sit
//!   behind traits so tests can swap in fixed fixtures
//!
//! # Example
//!
//! ```no_run
//! use stripserve::{FsRepository, FileSink, PageRenderer, PageRequest, SiteConfig};
//!
//! # fn main() -> stripserve::Result<()> {
//! let config = SiteConfig::default();
//! let repository = FsRepository::new(&config);
//! let sink = FileSink::new(&config.submission_log);
//! let renderer = PageRenderer::new(config, repository, sink);
//!
//! let request = PageRequest::from_query("comic=12345");
//! let page = renderer.render(&request)?;
//! println!("{}", page.body);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod error;
pub use error::{Error, Result};

pub mod template;

pub mod repository;
pub use repository::{ComicRepository, FixedRepository, FsRepository};

pub mod submission;
pub use submission::{FileSink, MemorySink, SubmissionRecord, SubmissionSink};

pub mod request;
pub use request::PageRequest;

pub mod page;
pub use page::{PageRenderer, RenderedPage};

// One-shot front end: prints the header line, a blank line, and the body
pub mod cgi;

// Threaded HTTP front end (tiny_http-backed)
#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "server")]
pub use server::SiteServer;

pub use template::Template;

/// Configuration for the comic site
///
/// This struct carries every path and fixed string the render pipeline needs.
/// The defaults mirror the conventional working-directory layout: an
/// `images/` directory of `*.png` strips, a `transcripts/` directory of
/// `<image-filename>.txt` files, and an `index.templ` template beside them.
/// The submission log deliberately lives outside the project tree so that
/// every handler process appends to the same file.
///
/// # Examples
///
/// ```
/// let cfg = stripserve::SiteConfig::default();
/// assert!(cfg.template_path.ends_with("index.templ"));
/// ```
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Directory of `*.png` comic images
    pub image_dir: PathBuf,
    /// Directory of `<image-filename>.txt` transcript files
    pub transcript_dir: PathBuf,
    /// HTML template containing the placeholder tokens
    pub template_path: PathBuf,
    /// Shared append-only log of proposed transcript edits
    pub submission_log: PathBuf,
    /// Base URL prefixed to image filenames in the rendered page
    pub image_base_url: String,
    /// Fixed line concatenated into the output when a submission is recorded
    pub confirmation_html: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("images"),
            transcript_dir: PathBuf::from("transcripts"),
            template_path: PathBuf::from("index.templ"),
            submission_log: PathBuf::from("/tmp/submissions.json"),
            image_base_url: "http://comics.example.com/strips/".to_string(),
            confirmation_html: "SUBMITTED UPDATED TRANSCRIPT: THANKS FOR PITCHING IN<br>".to_string(),
        }
    }
}
