use std::{io, fmt};
use nix::errno::Errno;
use crate::ast::AstNode;

/// What the caller should do after a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// Keep reading commands; carries the status of the last process.
    Code(i32),
    /// Stop the session (only the `exit` built-in produces this).
    Exit,
}

pub type ExecStatus = Result<ExecOutcome, ExecError>;

#[derive(Debug)]
pub enum ExecError {
    Fork(Errno),
    Pipe(Errno),
    Wait(Errno),
    Io(io::Error),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::Fork(e) => write!(f, "fork failed: {}", e),
            ExecError::Pipe(e) => write!(f, "pipe failed: {}", e),
            ExecError::Wait(e) => write!(f, "wait failed: {}", e),
            ExecError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ExecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecError::Fork(e) | ExecError::Pipe(e) | ExecError::Wait(e) => Some(e),
            ExecError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for ExecError {
    fn from(e: io::Error) -> Self {
        ExecError::Io(e)
    }
}

pub trait Executor {
    fn exec(&mut self, node: &AstNode) -> ExecStatus;
}
