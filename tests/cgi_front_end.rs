//! Integration tests for the one-shot CGI front end
//!
//! These drive the real binary the way a CGI host would: parameters through
//! `QUERY_STRING` (or stdin for POST), response on stdout, failures as a
//! non-zero exit with no error page.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

const TEMPLATE: &str = "<h1>###ID###</h1><img src=\"###IMAGE###\"><pre>###TRANSCRIPT###</pre>";

struct CgiSite {
    dir: tempfile::TempDir,
}

impl CgiSite {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();
        fs::create_dir_all(dir.path().join("transcripts")).unwrap();
        fs::write(dir.path().join("index.templ"), TEMPLATE).unwrap();
        CgiSite { dir }
    }

    fn add_comic(&self, id: &str, transcript: &str) {
        fs::write(self.dir.path().join(format!("images/{}.png", id)), b"png").unwrap();
        fs::write(
            self.dir.path().join(format!("transcripts/{}.png.txt", id)),
            transcript,
        )
        .unwrap();
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_stripserve"));
        cmd.arg("cgi")
            .arg("--image-dir")
            .arg(self.dir.path().join("images"))
            .arg("--transcript-dir")
            .arg(self.dir.path().join("transcripts"))
            .arg("--template")
            .arg(self.dir.path().join("index.templ"))
            .arg("--submission-log")
            .arg(self.dir.path().join("submissions.json"))
            .env_remove("QUERY_STRING")
            .env_remove("REQUEST_METHOD");
        cmd
    }
}

#[test]
fn test_get_request_emits_header_blank_line_and_body() {
    let site = CgiSite::new();
    site.add_comic("100", "SOME WORDS\n");

    let output = site
        .command()
        .env("QUERY_STRING", "comic=100")
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Content-type: text/html\n\n"));
    assert!(stdout.contains("<h1>100</h1>"));
    assert!(stdout.contains("SOME WORDS"));
    assert!(stdout.contains("100.gif"));
}

#[test]
fn test_missing_comic_exits_nonzero_with_no_partial_output() {
    let site = CgiSite::new();
    site.add_comic("1", "A");

    let output = site
        .command()
        .env("QUERY_STRING", "comic=doesnotexist")
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("doesnotexist"));
}

#[test]
fn test_post_body_triggers_submission() {
    let site = CgiSite::new();
    site.add_comic("42", "OLD\n");

    let mut child = site
        .command()
        .env("REQUEST_METHOD", "POST")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"action=submit&id=42&transcript=hello&comic=42")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("SUBMITTED UPDATED TRANSCRIPT"));
    assert!(stdout.contains("OLD"));

    let log = fs::read_to_string(site.dir.path().join("submissions.json")).unwrap();
    assert_eq!(log, r#"{"id":"42","transcript":"hello"}"#);
}
