use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use log::debug;
use nix::unistd::{getuid, User};
use crate::error::{self, ShellError};
use crate::executor::ExecOutcome;
use crate::shell::Shell;
use super::manager::{BuiltinCommand, BuiltinStatus};

pub struct ExitCommand;

impl BuiltinCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }
    fn run(&self, _args: &[String], _shell: &mut Shell) -> BuiltinStatus {
        Ok(ExecOutcome::Exit)
    }
}

pub struct CdCommand;

impl BuiltinCommand for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }
    fn run(&self, args: &[String], _shell: &mut Shell) -> BuiltinStatus {
        let target = match args {
            [] => home_dir().ok_or(ShellError::HomeUnresolvable)?,
            [dir] => PathBuf::from(dir),
            _ => {
                return Err(ShellError::Usage {
                    command: "cd",
                    message: "too many arguments",
                    usage: "cd [directory_name]",
                });
            }
        };
        std::env::set_current_dir(&target).map_err(|source| ShellError::NoSuchDirectory {
            path: target.display().to_string(),
            source,
        })?;
        debug!("cd {}", target.display());
        Ok(ExecOutcome::Code(0))
    }
}

/// `$HOME`, or the password database entry of the current user.
fn home_dir() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("HOME").filter(|h| !h.is_empty()) {
        return Some(PathBuf::from(home));
    }
    User::from_uid(getuid()).ok().flatten().map(|user| user.dir)
}

pub struct SourceCommand;

impl BuiltinCommand for SourceCommand {
    fn name(&self) -> &'static str {
        "source"
    }
    fn run(&self, args: &[String], shell: &mut Shell) -> BuiltinStatus {
        let [path] = args else {
            return Err(ShellError::Usage {
                command: "source",
                message: "filename argument required",
                usage: "source filename",
            });
        };
        let max_depth = shell.config().max_source_depth;
        if shell.source_depth() >= max_depth {
            return Err(ShellError::SourceDepth(max_depth));
        }
        let file = File::open(path).map_err(|source| ShellError::Source {
            path: path.clone(),
            source,
        })?;

        let outer_prev = shell.enter_source();
        let result = replay(path, BufReader::new(file), shell);
        shell.leave_source(outer_prev);
        result
    }
}

// Dispatches each line as if typed; `exit` ends this file, not the session.
fn replay(path: &str, reader: impl BufRead, shell: &mut Shell) -> BuiltinStatus {
    for line in reader.lines() {
        let line = line.map_err(|source| ShellError::Source {
            path: path.to_string(),
            source,
        })?;
        match shell.dispatch(&line) {
            Ok(ExecOutcome::Exit) => {
                debug!("source {}: stopped at exit", path);
                break;
            }
            Ok(ExecOutcome::Code(_)) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => error::report(&e),
        }
    }
    Ok(ExecOutcome::Code(0))
}

pub struct PrevCommand;

impl BuiltinCommand for PrevCommand {
    fn name(&self) -> &'static str {
        "prev"
    }
    fn run(&self, args: &[String], shell: &mut Shell) -> BuiltinStatus {
        if !args.is_empty() {
            return Err(ShellError::Usage {
                command: "prev",
                message: "prev takes no arguments",
                usage: "prev",
            });
        }
        let Some(line) = shell.prev().get().map(str::to_owned) else {
            return Ok(ExecOutcome::Code(0));
        };
        println!("{}", line);
        shell.dispatch_unrecorded(&line)
    }
}

pub struct HelpCommand;

impl BuiltinCommand for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }
    fn run(&self, _args: &[String], _shell: &mut Shell) -> BuiltinStatus {
        println!("Minishell built-in commands");
        println!("---");
        println!();
        println!("usage: cd [directory_name]");
        println!("Change the current working directory. Without a directory, change to the home directory.");
        println!();
        println!("usage: source [filename]");
        println!("Run each line of the file as if it was typed at the prompt, built-ins included. `exit` stops the file.");
        println!();
        println!("usage: prev");
        println!("Print the previous command and run it again. Does nothing if there is no previous command.");
        println!();
        println!("usage: help");
        println!("Show this help.");
        println!();
        println!("usage: exit");
        println!("Leave the shell.");
        Ok(ExecOutcome::Code(0))
    }
}
