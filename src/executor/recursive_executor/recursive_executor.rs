use std::ffi::CString;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::mem::ManuallyDrop;
use std::os::unix::io::FromRawFd;
use log::{debug, warn};
use nix::errno::Errno;
use nix::sys::signal::{signal, SigHandler, Signal};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{execvp, fork, ForkResult, Pid};
use super::pipeline::PipelineHandler;
use super::redirect::RedirectHandler;
use crate::ast::{AstNode, CommandNode};
use crate::executor::{ExecError, ExecOutcome, ExecStatus, Executor};

/// Realizes a command tree as a tree of child processes.
///
/// Every external program runs in its own forked child. Sequences run their
/// sides one after the other, pipelines launch both sides before waiting.
/// The calling process never changes its own standard descriptors.
#[derive(Debug, Default)]
pub struct RecursiveExecutor;

impl RecursiveExecutor {
    pub fn new() -> Self {
        RecursiveExecutor
    }
}

impl Executor for RecursiveExecutor {
    fn exec(&mut self, node: &AstNode) -> ExecStatus {
        run_node(node).map(ExecOutcome::Code)
    }
}

/// Runs `node` to completion and returns the status of its last process.
pub(super) fn run_node(node: &AstNode) -> Result<i32, ExecError> {
    match node {
        AstNode::Empty => Ok(0),
        AstNode::Sequence(left, right) => {
            // The right side runs even when the left one could not be started
            if let Err(e) = run_node(left) {
                warn!("left side of ';' failed: {}", e);
                report(format_args!("{}", e));
            }
            run_node(right)
        }
        AstNode::Pipeline(left, right) => PipelineHandler::run(left, right),
        AstNode::Command(_) | AstNode::Redirect { .. } => {
            let pid = spawn(node)?;
            wait_for(pid)
        }
    }
}

fn spawn(node: &AstNode) -> Result<Pid, ExecError> {
    // SAFETY: the child only rewires descriptors, forks or execs, and always
    // leaves through `_exit`.
    match unsafe { fork() }.map_err(ExecError::Fork)? {
        ForkResult::Parent { child } => {
            debug!("spawned pid {} for {}", child, label(node));
            Ok(child)
        }
        ForkResult::Child => realize(node),
    }
}

/// Turns the current (forked) process into `node`. Never returns.
pub(super) fn realize(node: &AstNode) -> ! {
    let code = match node {
        AstNode::Command(cmd) => exec_program(cmd),
        AstNode::Redirect { node: inner, kind, file } => match RedirectHandler::bind(*kind, file) {
            Ok(()) => realize(inner),
            Err(e) => {
                report(format_args!("{}: {}", file, e));
                1
            }
        },
        other => match run_node(other) {
            Ok(code) => code,
            Err(e) => {
                report(format_args!("{}", e));
                1
            }
        },
    };
    child_exit(code)
}

// Returns only if the program image could not be replaced.
fn exec_program(cmd: &CommandNode) -> i32 {
    let argv: Result<Vec<CString>, _> = cmd.argv().map(CString::new).collect();
    let Ok(argv) = argv else {
        report(format_args!("{}: argument contains a NUL byte", cmd.name));
        return 126;
    };
    // The runtime ignores SIGPIPE and exec keeps ignored signals; a pipeline
    // writer must die once its reader is gone.
    // SAFETY: single-threaded child, no handler function is installed.
    let _ = unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) };
    match execvp(&argv[0], &argv) {
        Ok(never) => match never {},
        Err(Errno::ENOENT) => {
            report(format_args!("{}: command not found", cmd.name));
            127
        }
        Err(e) => {
            report(format_args!("{}: {}", cmd.name, e.desc()));
            126
        }
    }
}

/// Blocks until `pid` terminates and maps its wait status to an exit code.
pub(super) fn wait_for(pid: Pid) -> Result<i32, ExecError> {
    loop {
        match waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => {
                debug!("reaped pid {} (exit {})", pid, code);
                return Ok(code);
            }
            Ok(WaitStatus::Signaled(_, sig, _)) => {
                debug!("reaped pid {} (signal {})", pid, sig);
                return Ok(128 + sig as i32);
            }
            Ok(_) | Err(Errno::EINTR) => continue,
            Err(e) => return Err(ExecError::Wait(e)),
        }
    }
}

pub(super) fn child_exit(code: i32) -> ! {
    // `_exit` skips std's stdout flush, which would replay the parent's
    // buffered output a second time.
    unsafe { libc::_exit(code) }
}

/// Writes an error line straight to descriptor 2.
///
/// Forked children must not touch std's stderr lock, which another thread
/// of the parent may have held at fork time.
pub(super) fn report(args: fmt::Arguments<'_>) {
    // SAFETY: descriptor 2 stays open; ManuallyDrop keeps it from being closed.
    let mut stderr = ManuallyDrop::new(unsafe { File::from_raw_fd(libc::STDERR_FILENO) });
    let _ = writeln!(stderr, "minishell: {}", args);
}

fn label(node: &AstNode) -> &str {
    match node {
        AstNode::Empty => "<empty>",
        AstNode::Command(cmd) => &cmd.name,
        AstNode::Sequence(..) => "<sequence>",
        AstNode::Redirect { .. } => "<redirect>",
        AstNode::Pipeline(..) => "<pipeline>",
    }
}
