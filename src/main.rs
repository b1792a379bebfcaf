use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use argh::FromArgs;
use log::{info, LevelFilter};
use minishell::config::{Config, ConfigLoader};
use minishell::error::{self, ShellError};
use minishell::logging;
use minishell::repl;
use minishell::shell::Shell;

#[derive(FromArgs)]
/// A small interactive shell with sequences, pipes and redirections.
struct Args {
    /// configuration file (defaults to ~/.minishellrc when present)
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// log at debug level
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// run the lines of this file instead of reading stdin
    #[argh(positional)]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error::report(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), ShellError> {
    let mut config = load_config(args.config)?;
    if args.verbose {
        config.log_level = LevelFilter::Debug;
    }
    logging::init(config.log_level, config.log_file.as_deref())?;
    info!("minishell starting");

    let mut shell = Shell::new(config);
    match args.script {
        Some(path) => {
            let file = File::open(&path).map_err(|source| ShellError::Source {
                path: path.display().to_string(),
                source,
            })?;
            repl::run(&mut shell, BufReader::new(file), false)
        }
        None => {
            let interactive = io::stdin().is_terminal();
            repl::run(&mut shell, io::stdin().lock(), interactive)
        }
    }
}

// An explicit path must load; the default file is optional.
fn load_config(explicit: Option<PathBuf>) -> Result<Config, ShellError> {
    if let Some(path) = explicit {
        return Ok(ConfigLoader::load_from_file(path)?);
    }
    match ConfigLoader::default_path() {
        Some(path) if path.is_file() => Ok(ConfigLoader::load_from_file(path)?),
        _ => Ok(ConfigLoader::default_config()),
    }
}
