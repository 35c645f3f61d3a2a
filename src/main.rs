use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stripserve::SiteConfig;

#[derive(Parser)]
#[command(name = "stripserve", version, about = "Web-comic page and transcript server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Site layout flags shared by both front ends
#[derive(Args)]
struct SiteArgs {
    /// Directory of *.png comic images
    #[arg(long, default_value = "images")]
    image_dir: PathBuf,

    /// Directory of <image-filename>.txt transcript files
    #[arg(long, default_value = "transcripts")]
    transcript_dir: PathBuf,

    /// HTML template containing the placeholder tokens
    #[arg(long, default_value = "index.templ")]
    template: PathBuf,

    /// Shared append-only submission log
    #[arg(long, default_value = "/tmp/submissions.json")]
    submission_log: PathBuf,

    /// Base URL prefixed to image filenames in rendered pages
    #[arg(long, default_value = "http://comics.example.com/strips/")]
    base_url: String,
}

impl SiteArgs {
    fn into_config(self) -> SiteConfig {
        SiteConfig {
            image_dir: self.image_dir,
            transcript_dir: self.transcript_dir,
            template_path: self.template,
            submission_log: self.submission_log,
            image_base_url: self.base_url,
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run the threaded HTTP server
    #[cfg(feature = "server")]
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: String,

        #[command(flatten)]
        site: SiteArgs,
    },

    /// Handle one CGI request from the environment and exit
    Cgi {
        #[command(flatten)]
        site: SiteArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        #[cfg(feature = "server")]
        Command::Serve { addr, site } => stripserve::server::serve(site.into_config(), &addr),
        Command::Cgi { site } => stripserve::cgi::run_cgi(site.into_config()),
    };

    if let Err(e) = result {
        eprintln!("stripserve: {}", e);
        std::process::exit(1);
    }
}
