//! The comic page renderer.
//!
//! One linear pipeline per request: record a submitted edit if the request
//! carries one, resolve the (image, transcript) pair, load the template fresh
//! from disk, substitute the three placeholder tokens, and hand back the
//! finished HTML. There is no state between requests; both back ends are
//! injected so the pipeline runs unchanged against fixtures.

use crate::template::{self, Template};
use crate::{ComicRepository, PageRequest, Result, SiteConfig, SubmissionSink};

/// Finished output of one request
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Complete HTML body, confirmation line included when one was emitted
    pub body: String,
    /// Whether a transcript submission was recorded for this request
    pub submitted: bool,
}

/// Assembles comic pages from an injected repository and submission sink
pub struct PageRenderer<R: ComicRepository, S: SubmissionSink> {
    config: SiteConfig,
    repository: R,
    sink: S,
}

impl<R: ComicRepository, S: SubmissionSink> PageRenderer<R, S> {
    pub fn new(config: SiteConfig, repository: R, sink: S) -> Self {
        Self {
            config,
            repository,
            sink,
        }
    }

    /// Site configuration this renderer was built with.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Produce the final HTML for one request.
    ///
    /// A submission is recorded before the page resolves, and never
    /// suppresses rendering: a submit request still returns the full comic
    /// page with the confirmation line prepended. Requests without an
    /// explicit `comic` pick one uniformly at random from a fresh directory
    /// listing.
    pub fn render(&self, req: &PageRequest) -> Result<RenderedPage> {
        let mut body = String::new();
        let mut submitted = false;

        if req.is_submission() {
            // is_submission guarantees both fields are present
            let id = req.id.as_deref().unwrap_or_default();
            let transcript = req.transcript.as_deref().unwrap_or_default();
            self.sink.record_submission(id, transcript)?;
            body.push_str(&self.config.confirmation_html);
            body.push('\n');
            submitted = true;
        }

        let image = match req.comic.as_deref() {
            Some(comic) => self.repository.image_filename(comic),
            None => {
                let id = self.repository.random_id()?;
                self.repository.image_filename(&id)
            }
        };

        let id = image.strip_suffix(".png").unwrap_or(&image);
        let transcript = self.repository.load_transcript(id)?;

        let template = Template::load(&self.config.template_path)?;

        // The gif rewrite is a literal substring replacement over the whole
        // filename, so an identifier containing "png" is rewritten too.
        let image_url = format!("{}{}", self.config.image_base_url, image.replace("png", "gif"));

        body.push_str(&template.render(&[
            (template::ID_TOKEN, id),
            (template::IMAGE_TOKEN, image_url.as_str()),
            (template::TRANSCRIPT_TOKEN, transcript.as_str()),
        ]));

        Ok(RenderedPage { body, submitted })
    }
}
