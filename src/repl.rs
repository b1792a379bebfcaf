use std::io::{self, BufRead, Write};
use log::{debug, info};
use crate::error::{self, ShellError};
use crate::executor::ExecOutcome;
use crate::shell::Shell;

/// Reads lines from `input` and dispatches each one until `exit`, end of
/// input, or a fatal error.
///
/// When `interactive` is set the prompt, banner and farewell are printed.
pub fn run<R: BufRead>(shell: &mut Shell, mut input: R, interactive: bool) -> Result<(), ShellError> {
    if interactive {
        println!("{}", shell.config().banner);
    }
    let mut buf = String::new();
    loop {
        if interactive {
            print!("{}", shell.config().prompt);
            io::stdout().flush()?;
        }

        buf.clear();
        if input.read_line(&mut buf)? == 0 {
            // EOF (e.g. Ctrl-D)
            debug!("end of input");
            if interactive {
                println!();
            }
            break;
        }
        let line = buf.trim_end_matches(['\n', '\r']);

        match shell.dispatch(line) {
            Ok(ExecOutcome::Exit) => {
                info!("exit requested");
                break;
            }
            Ok(ExecOutcome::Code(code)) => debug!("status {}", code),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => error::report(&e),
        }
    }
    if interactive {
        println!("{}", shell.config().farewell);
    }
    Ok(())
}
