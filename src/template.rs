//! Literal-placeholder HTML templating.
//!
//! The template document is plain text carrying marker tokens such as
//! `###ID###`. Rendering replaces every literal occurrence of each token with
//! its computed value; there is no escaping, no nesting, and no conditional
//! logic. Callers re-load the template for every request, so edits to the
//! file on disk take effect immediately.

use std::path::Path;

use crate::{Error, Result};

/// Placeholder for the bare comic identifier
pub const ID_TOKEN: &str = "###ID###";

/// Placeholder for the full image URL
pub const IMAGE_TOKEN: &str = "###IMAGE###";

/// Placeholder for the verbatim transcript text
pub const TRANSCRIPT_TOKEN: &str = "###TRANSCRIPT###";

/// An HTML document with literal placeholder tokens
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
}

impl Template {
    /// Read the template fresh from disk.
    pub fn load(path: &Path) -> Result<Template> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::TemplateError(format!("{}: {}", path.display(), e))
        })?;
        Ok(Template { text })
    }

    /// Build a template from an in-memory document.
    pub fn from_text(text: impl Into<String>) -> Template {
        Template { text: text.into() }
    }

    /// Raw document text before substitution.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace all literal occurrences of each placeholder with its value.
    ///
    /// Substitutions are applied in order, each one scanning the whole
    /// document. A token that does not appear is a no-op; a token that
    /// appears several times is replaced everywhere.
    pub fn render(&self, substitutions: &[(&str, &str)]) -> String {
        let mut out = self.text.clone();
        for (token, value) in substitutions {
            out = out.replace(token, value);
        }
        out
    }
}
