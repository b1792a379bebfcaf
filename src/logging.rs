use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};

/// Installs the global logger.
///
/// Nothing is installed for `LevelFilter::Off`. With `file` set, records are
/// appended there; otherwise they go to stderr.
pub fn init(level: LevelFilter, file: Option<&Path>) -> io::Result<()> {
    if level == LevelFilter::Off {
        return Ok(());
    }
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    let installed = match file {
        Some(path) => {
            let out = OpenOptions::new().create(true).append(true).open(path)?;
            WriteLogger::init(level, config, out)
        }
        None => TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto),
    };
    installed.map_err(io::Error::other)
}
