//! Terminal logging for the page_trimmer binary.
//!
//! Log lines go to stderr so that stdout carries only the `url:` line.

use log::LevelFilter;
use simplelog::{ColorChoice, Config, ConfigBuilder, TermLogger, TerminalMode};

/// Installs the global logger for the given `-v` count.
pub fn initialize(verbosity: u8) {
    let level = trimmer_logging::level_for_verbosity(verbosity);
    let _ = TermLogger::init(
        level,
        build_config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
