use clap::{ArgAction, Parser};

/// Fetch a web page and save a copy stripped of scripts, styles, metadata,
/// images and forms.
#[derive(Debug, Parser)]
#[command(name = "page_trimmer", version, about)]
pub struct Cli {
    /// Absolute http(s) URL of the page to fetch.
    pub url: Option<String>,

    /// Log progress to stderr; repeat for debug output.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
