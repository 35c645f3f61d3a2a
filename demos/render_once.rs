//! Minimal demo: render one comic page against an in-memory fixture.
//!
//! Run: cargo run --example render_once

use stripserve::{FixedRepository, MemorySink, PageRenderer, PageRequest, SiteConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Stripserve - Minimal Render Example\n");

    // Write a throwaway template so the demo needs no site checkout
    let dir = tempfile::tempdir()?;
    let template_path = dir.path().join("index.templ");
    std::fs::write(
        &template_path,
        "<html>\n<h1>Comic ###ID###</h1>\n<img src=\"###IMAGE###\">\n<pre>###TRANSCRIPT###</pre>\n</html>\n",
    )?;

    let config = SiteConfig {
        template_path,
        ..Default::default()
    };

    let repository = FixedRepository::new()
        .with_comic("12345", "PANEL 1\nSOMEONE: HELLO\nSOMEONE ELSE: HELLO BACK\n");

    let renderer = PageRenderer::new(config, repository, MemorySink::new());

    let page = renderer.render(&PageRequest::from_query("comic=12345"))?;
    println!("{}", page.body);

    Ok(())
}
