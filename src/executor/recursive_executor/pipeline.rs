use std::os::fd::{AsRawFd, OwnedFd};
use log::{debug, warn};
use nix::unistd::{dup2, fork, pipe, ForkResult};
use super::recursive_executor::{child_exit, realize, report, wait_for};
use crate::ast::AstNode;
use crate::executor::ExecError;

pub struct PipelineHandler;

impl PipelineHandler {
    /// Connects `left`'s stdout to `right`'s stdin.
    ///
    /// Both children are forked before either is waited on, and the caller
    /// closes its copies of both pipe ends first so the reader sees EOF once
    /// the writer is gone. Returns the status of the right side.
    pub fn run(left: &AstNode, right: &AstNode) -> Result<i32, ExecError> {
        // 1. create pipe
        let (read_end, write_end) = pipe().map_err(ExecError::Pipe)?;

        // 2. left side writes into the pipe
        // SAFETY: children only rewire descriptors before `realize`.
        let left_pid = match unsafe { fork() } {
            Ok(ForkResult::Child) => {
                drop(read_end);
                attach(write_end, libc::STDOUT_FILENO);
                realize(left)
            }
            Ok(ForkResult::Parent { child }) => child,
            Err(e) => return Err(ExecError::Fork(e)),
        };

        // 3. right side reads from it
        let right_pid = match unsafe { fork() } {
            Ok(ForkResult::Child) => {
                drop(write_end);
                attach(read_end, libc::STDIN_FILENO);
                realize(right)
            }
            Ok(ForkResult::Parent { child }) => child,
            Err(e) => {
                drop(read_end);
                drop(write_end);
                let _ = wait_for(left_pid);
                return Err(ExecError::Fork(e));
            }
        };
        debug!("pipeline {} | {}", left_pid, right_pid);

        // 4. parent keeps no pipe ends, then reaps left before right
        drop(read_end);
        drop(write_end);
        if let Err(e) = wait_for(left_pid) {
            warn!("waiting for pipeline writer failed: {}", e);
        }
        wait_for(right_pid)
    }
}

// Child side: move `fd` onto `target`, then close the original.
fn attach(fd: OwnedFd, target: i32) {
    if fd.as_raw_fd() == target {
        // Already in place; closing it would undo the wiring
        std::mem::forget(fd);
        return;
    }
    if let Err(e) = dup2(fd.as_raw_fd(), target) {
        report(format_args!("dup2 failed: {}", e));
        child_exit(1);
    }
}
