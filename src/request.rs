//! Request parameter extraction.
//!
//! Parameters arrive as an `application/x-www-form-urlencoded` string: the
//! query string in CGI/GET mode, or the form body of a POST. Empty values are
//! treated as absent, so `?comic=` falls back to random selection and an
//! empty transcript never triggers the submission branch.

use url::form_urlencoded;

/// Parameters of one comic page request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Explicit comic identifier; absent selects one at random
    pub comic: Option<String>,
    /// Expected value `"submit"` to trigger the submission path
    pub action: Option<String>,
    /// Identifier of the comic a submitted transcript belongs to
    pub id: Option<String>,
    /// Proposed transcript text
    pub transcript: Option<String>,
}

impl PageRequest {
    /// Decode a query string or form body.
    ///
    /// The first occurrence of each known parameter wins; unknown parameters
    /// are ignored.
    pub fn from_query(raw: &str) -> PageRequest {
        let mut req = PageRequest::default();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_ref() {
                "comic" => &mut req.comic,
                "action" => &mut req.action,
                "id" => &mut req.id,
                "transcript" => &mut req.transcript,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        req
    }

    /// Whether this request carries a complete transcript submission.
    pub fn is_submission(&self) -> bool {
        self.action.as_deref() == Some("submit") && self.id.is_some() && self.transcript.is_some()
    }
}
