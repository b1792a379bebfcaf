use std::fmt;
use std::io;
use log::{error, warn};
use crate::config::ConfigError;
use crate::executor::ExecError;
use crate::lexer::LexError;
use crate::parser::ParseError;

#[derive(Debug)]
pub enum ShellError {
    Lex(LexError),
    Parse(ParseError),
    Exec(ExecError),
    Config(ConfigError),
    Usage {
        command: &'static str,
        message: &'static str,
        usage: &'static str,
    },
    NoSuchDirectory {
        path: String,
        source: io::Error,
    },
    HomeUnresolvable,
    Source {
        path: String,
        source: io::Error,
    },
    SourceDepth(usize),
    Io(io::Error),
}

impl ShellError {
    /// Errors the session cannot continue from: the whole process stops.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ShellError::Lex(LexError::UnterminatedQuote { .. })
                | ShellError::HomeUnresolvable
                | ShellError::Config(_)
        )
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Lex(e) => write!(f, "Lexing error: {}", e),
            ShellError::Parse(e) => write!(f, "Parsing error: {}", e),
            ShellError::Exec(e) => write!(f, "Execution error: {}", e),
            ShellError::Config(e) => write!(f, "Configuration error: {}", e),
            ShellError::Usage { command, message, usage } => {
                write!(f, "{}: {}\n{}: usage: {}", command, message, command, usage)
            }
            ShellError::NoSuchDirectory { path, source } => {
                write!(f, "cd: {}: given directory does not exist ({})", path, source)
            }
            ShellError::HomeUnresolvable => write!(f, "cd: cannot determine the home directory"),
            ShellError::Source { path, source } => write!(f, "source: {}: {}", path, source),
            ShellError::SourceDepth(max) => write!(f, "source: nesting deeper than {} files", max),
            ShellError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Lex(e) => Some(e),
            ShellError::Parse(e) => Some(e),
            ShellError::Exec(e) => Some(e),
            ShellError::Config(e) => Some(e),
            ShellError::NoSuchDirectory { source, .. } | ShellError::Source { source, .. } => Some(source),
            ShellError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexError> for ShellError {
    fn from(e: LexError) -> Self {
        ShellError::Lex(e)
    }
}

impl From<ParseError> for ShellError {
    fn from(e: ParseError) -> Self {
        ShellError::Parse(e)
    }
}

impl From<ExecError> for ShellError {
    fn from(e: ExecError) -> Self {
        ShellError::Exec(e)
    }
}

impl From<ConfigError> for ShellError {
    fn from(e: ConfigError) -> Self {
        ShellError::Config(e)
    }
}

impl From<io::Error> for ShellError {
    fn from(e: io::Error) -> Self {
        ShellError::Io(e)
    }
}

/// Prints `err` for the user and logs it.
pub fn report(err: &ShellError) {
    if err.is_fatal() {
        error!("{}", err);
    } else {
        warn!("{}", err);
    }
    eprintln!("minishell: {}", err);
}
