use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, IntoRawFd, RawFd};
use nix::unistd::dup2;
use crate::ast::RedirectKind;

pub struct RedirectHandler;

impl RedirectHandler {
    /// Opens the redirect target: read-only for `<`, created (0644) and
    /// truncated for `>`.
    pub fn open(kind: RedirectKind, file: &str) -> io::Result<File> {
        match kind {
            RedirectKind::In => File::open(file),
            RedirectKind::Out => OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o644)
                .open(file),
        }
    }

    pub fn target_fd(kind: RedirectKind) -> i32 {
        match kind {
            RedirectKind::In => libc::STDIN_FILENO,
            RedirectKind::Out => libc::STDOUT_FILENO,
        }
    }

    /// Replaces stdin or stdout of the calling process with `file`.
    ///
    /// Only called inside a forked child, right before the program image is
    /// replaced. The opened descriptor is closed once duplicated.
    pub fn bind(kind: RedirectKind, file: &str) -> io::Result<()> {
        let f = Self::open(kind, file)?;
        install(f, Self::target_fd(kind))
    }
}

fn install(f: File, target: RawFd) -> io::Result<()> {
    if f.as_raw_fd() == target {
        // open() already landed on the target; dropping `f` would close it
        let _ = f.into_raw_fd();
        return Ok(());
    }
    dup2(f.as_raw_fd(), target)?;
    Ok(())
}
