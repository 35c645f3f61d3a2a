//! Comic lookup back ends.
//!
//! The render pipeline never walks the filesystem itself; it goes through the
//! [`ComicRepository`] trait so the directory scan and the random choice can
//! be swapped for a fixed fixture in tests. `FsRepository` is the production
//! implementation over the two on-disk directories; `FixedRepository` is a
//! deterministic in-memory double.

use std::collections::BTreeMap;
use std::path::PathBuf;

use rand::seq::IndexedRandom;

use crate::{Error, Result, SiteConfig};

/// Core trait for comic lookup implementations
pub trait ComicRepository {
    /// Bare identifiers of every comic known at call time.
    ///
    /// Implementations must not cache: the set reflects whatever exists when
    /// the call is made.
    fn list_ids(&self) -> Result<Vec<String>>;

    /// Pick one identifier uniformly at random from a fresh listing.
    fn random_id(&self) -> Result<String>;

    /// Full transcript text for a comic, verbatim.
    fn load_transcript(&self, id: &str) -> Result<String>;

    /// Whether an image exists for the identifier.
    fn image_exists(&self, id: &str) -> bool;

    /// Image filename for an identifier, by convention `<id>.png`.
    fn image_filename(&self, id: &str) -> String {
        format!("{}.png", id)
    }
}

/// Reject identifiers that could escape the comic directories.
///
/// Identifiers are filename stems; anything carrying a path separator or a
/// parent-directory component is refused before the filesystem is touched.
fn validate_id(id: &str) -> Result<()> {
    if id.contains('/') || id.contains('\\') || id.contains("..") {
        return Err(Error::InvalidId(id.to_string()));
    }
    Ok(())
}

/// Filesystem-backed repository over an image and a transcript directory
///
/// Every call performs a fresh scan or read; there is no caching layer, so a
/// comic dropped into `images/` is eligible for selection on the very next
/// request.
pub struct FsRepository {
    image_dir: PathBuf,
    transcript_dir: PathBuf,
}

impl FsRepository {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            image_dir: config.image_dir.clone(),
            transcript_dir: config.transcript_dir.clone(),
        }
    }
}

impl ComicRepository for FsRepository {
    fn list_ids(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.image_dir).map_err(|e| {
            Error::ConfigError(format!(
                "cannot list image directory {}: {}",
                self.image_dir.display(),
                e
            ))
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::Other(e.to_string()))?;
            if let Some(name) = entry.file_name().to_str() {
                if let Some(stem) = name.strip_suffix(".png") {
                    ids.push(stem.to_string());
                }
            }
        }
        Ok(ids)
    }

    fn random_id(&self) -> Result<String> {
        let ids = self.list_ids()?;
        ids.choose(&mut rand::rng())
            .cloned()
            .ok_or(Error::EmptyArchive)
    }

    fn load_transcript(&self, id: &str) -> Result<String> {
        validate_id(id)?;
        let path = self.transcript_dir.join(format!("{}.png.txt", id));
        std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                if self.image_exists(id) {
                    log::warn!("comic {} has an image but no transcript", id);
                    Error::TranscriptNotFound(id.to_string())
                } else {
                    Error::ComicNotFound(id.to_string())
                }
            } else {
                Error::Other(format!("{}: {}", path.display(), e))
            }
        })
    }

    fn image_exists(&self, id: &str) -> bool {
        if validate_id(id).is_err() {
            return false;
        }
        self.image_dir.join(self.image_filename(id)).is_file()
    }
}

/// In-memory repository with a fixed comic set
///
/// A deterministic double for tests and demos: `random_id` returns the first
/// identifier in sorted order, so assertions never race a real RNG.
#[derive(Debug, Clone, Default)]
pub struct FixedRepository {
    transcripts: BTreeMap<String, String>,
}

impl FixedRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a comic with its transcript text.
    pub fn with_comic(mut self, id: &str, transcript: &str) -> Self {
        self.transcripts.insert(id.to_string(), transcript.to_string());
        self
    }
}

impl ComicRepository for FixedRepository {
    fn list_ids(&self) -> Result<Vec<String>> {
        Ok(self.transcripts.keys().cloned().collect())
    }

    fn random_id(&self) -> Result<String> {
        self.transcripts
            .keys()
            .next()
            .cloned()
            .ok_or(Error::EmptyArchive)
    }

    fn load_transcript(&self, id: &str) -> Result<String> {
        self.transcripts
            .get(id)
            .cloned()
            .ok_or_else(|| Error::ComicNotFound(id.to_string()))
    }

    fn image_exists(&self, id: &str) -> bool {
        self.transcripts.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture_config(root: &std::path::Path) -> SiteConfig {
        let image_dir = root.join("images");
        let transcript_dir = root.join("transcripts");
        fs::create_dir_all(&image_dir).unwrap();
        fs::create_dir_all(&transcript_dir).unwrap();
        SiteConfig {
            image_dir,
            transcript_dir,
            ..Default::default()
        }
    }

    fn add_comic(config: &SiteConfig, id: &str, transcript: &str) {
        fs::write(config.image_dir.join(format!("{}.png", id)), b"png").unwrap();
        fs::write(
            config.transcript_dir.join(format!("{}.png.txt", id)),
            transcript,
        )
        .unwrap();
    }

    #[test]
    fn test_list_ids_only_sees_png_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture_config(dir.path());
        add_comic(&config, "100", "A");
        fs::write(config.image_dir.join("notes.txt"), b"x").unwrap();
        fs::write(config.image_dir.join("200.jpg"), b"x").unwrap();

        let repo = FsRepository::new(&config);
        let ids = repo.list_ids().unwrap();
        assert_eq!(ids, vec!["100".to_string()]);
    }

    #[test]
    fn test_random_id_is_member_of_listing() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture_config(dir.path());
        add_comic(&config, "1", "A");
        add_comic(&config, "2", "B");
        add_comic(&config, "3", "C");

        let repo = FsRepository::new(&config);
        let ids = repo.list_ids().unwrap();
        for _ in 0..20 {
            let picked = repo.random_id().unwrap();
            assert!(ids.contains(&picked));
        }
    }

    #[test]
    fn test_random_id_on_empty_dir_is_empty_archive() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture_config(dir.path());
        let repo = FsRepository::new(&config);
        assert!(matches!(repo.random_id(), Err(Error::EmptyArchive)));
    }

    #[test]
    fn test_load_transcript_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture_config(dir.path());
        add_comic(&config, "7", "LINE ONE\nLINE <b>TWO</b>\n");

        let repo = FsRepository::new(&config);
        assert_eq!(repo.load_transcript("7").unwrap(), "LINE ONE\nLINE <b>TWO</b>\n");
    }

    #[test]
    fn test_missing_comic_vs_missing_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture_config(dir.path());
        // image present, transcript absent
        fs::write(config.image_dir.join("55.png"), b"png").unwrap();

        let repo = FsRepository::new(&config);
        assert!(matches!(
            repo.load_transcript("55"),
            Err(Error::TranscriptNotFound(_))
        ));
        assert!(matches!(
            repo.load_transcript("doesnotexist"),
            Err(Error::ComicNotFound(_))
        ));
    }

    #[test]
    fn test_traversal_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture_config(dir.path());
        let repo = FsRepository::new(&config);
        assert!(matches!(
            repo.load_transcript("../etc/passwd"),
            Err(Error::InvalidId(_))
        ));
        assert!(matches!(
            repo.load_transcript("a/b"),
            Err(Error::InvalidId(_))
        ));
        assert!(!repo.image_exists("..\\x"));
    }

    #[test]
    fn test_fixed_repository_is_deterministic() {
        let repo = FixedRepository::new()
            .with_comic("b", "B")
            .with_comic("a", "A");
        assert_eq!(repo.random_id().unwrap(), "a");
        assert_eq!(repo.list_ids().unwrap(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(repo.load_transcript("b").unwrap(), "B");
        assert!(repo.image_exists("a"));
        assert!(!repo.image_exists("z"));
    }
}
