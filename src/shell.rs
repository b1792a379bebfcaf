//! Session state and the per-line dispatcher.
//!
//! A line is tokenized, then routed in this order: `exit` stops the session,
//! a line with any control operator goes to the executor as a whole, a
//! leading built-in name runs in-process, anything else goes to the executor.

use std::rc::Rc;
use log::debug;
use crate::config::Config;
use crate::error::ShellError;
use crate::executor::builtin::BuiltinManager;
use crate::executor::{Executor, ExecOutcome, RecursiveExecutor};
use crate::history::PrevSlot;
use crate::lexer::{Lexer, TokenKind};
use crate::parser::{scan, OperatorParser, Parser};

pub struct Shell {
    config: Config,
    executor: Box<dyn Executor>,
    builtins: Rc<BuiltinManager>,
    prev: PrevSlot,
    source_depth: usize,
}

impl Shell {
    pub fn new(config: Config) -> Self {
        Self::with_executor(config, Box::new(RecursiveExecutor::new()))
    }

    pub fn with_executor(config: Config, executor: Box<dyn Executor>) -> Self {
        Shell {
            config,
            executor,
            builtins: Rc::new(BuiltinManager::new()),
            prev: PrevSlot::new(),
            source_depth: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn prev(&self) -> &PrevSlot {
        &self.prev
    }

    /// Number of `source` files currently being replayed.
    pub fn source_depth(&self) -> usize {
        self.source_depth
    }

    /// Runs one line and remembers it for `prev`.
    pub fn dispatch(&mut self, line: &str) -> Result<ExecOutcome, ShellError> {
        self.dispatch_line(line, true)
    }

    /// Runs one line without touching the previous-command slot.
    pub fn dispatch_unrecorded(&mut self, line: &str) -> Result<ExecOutcome, ShellError> {
        self.dispatch_line(line, false)
    }

    /// Starts replaying a sourced file, which gets a slot of its own.
    /// Returns the session slot for [`Shell::leave_source`].
    pub fn enter_source(&mut self) -> PrevSlot {
        self.source_depth += 1;
        std::mem::take(&mut self.prev)
    }

    pub fn leave_source(&mut self, outer: PrevSlot) {
        self.source_depth = self.source_depth.saturating_sub(1);
        self.prev = outer;
    }

    fn dispatch_line(&mut self, line: &str, record: bool) -> Result<ExecOutcome, ShellError> {
        let tokens = Lexer::new(line)
            .with_max_len(self.config.max_line_len)
            .tokenize()?;
        let Some(first) = tokens.first() else {
            return Ok(ExecOutcome::Code(0));
        };
        debug!("dispatch {:?} ({} tokens)", line, tokens.len());

        let builtins = Rc::clone(&self.builtins);
        let builtin = match first.kind {
            TokenKind::Word => builtins.get(&first.lexeme),
            _ => None,
        };
        if let Some(cmd) = builtin {
            if cmd.name() == "exit" {
                return cmd.run(&[], self);
            }
            if !scan::contains_operator(&tokens) {
                if record && cmd.name() != "prev" {
                    self.prev.record(line);
                }
                let args: Vec<String> = tokens[1..].iter().map(|t| t.lexeme.clone()).collect();
                return cmd.run(&args, self);
            }
        }

        let ast = OperatorParser::new(&tokens).parse()?;
        if record {
            self.prev.record(line);
        }
        Ok(self.executor.exec(&ast)?)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fs;
    use std::path::PathBuf;
    use std::rc::Rc;
    use super::*;
    use crate::ast::{AstNode, CommandNode};
    use crate::executor::tests::MockExecutor;
    use crate::lexer::LexError;

    fn mock_shell(config: Config) -> (Shell, Rc<RefCell<Vec<AstNode>>>) {
        let executor = MockExecutor::new();
        let log = Rc::clone(&executor.log);
        (Shell::with_executor(config, Box::new(executor)), log)
    }

    fn cmd(name: &str, args: &[&str]) -> AstNode {
        AstNode::Command(CommandNode::new(name, args))
    }

    fn script(name: &str, lines: &[&str]) -> PathBuf {
        let path = std::env::temp_dir()
            .join(format!("minishell-shell-{}-{}", std::process::id(), name));
        fs::write(&path, lines.join("\n") + "\n").unwrap();
        path
    }

    #[test]
    fn test_empty_line_does_nothing() {
        let (mut shell, log) = mock_shell(Config::default());
        assert_eq!(shell.dispatch("   ").unwrap(), ExecOutcome::Code(0));
        assert!(log.borrow().is_empty());
        assert!(shell.prev().is_empty());
    }

    #[test]
    fn test_exit_stops_without_recording() {
        let (mut shell, log) = mock_shell(Config::default());
        assert_eq!(shell.dispatch("exit").unwrap(), ExecOutcome::Exit);
        assert_eq!(shell.dispatch("exit ; echo hi").unwrap(), ExecOutcome::Exit);
        assert!(log.borrow().is_empty());
        assert!(shell.prev().is_empty());
    }

    #[test]
    fn test_external_command_is_executed_and_recorded() {
        let (mut shell, log) = mock_shell(Config::default());
        shell.dispatch("echo hi").unwrap();
        assert_eq!(*log.borrow(), vec![cmd("echo", &["hi"])]);
        assert_eq!(shell.prev().get(), Some("echo hi"));
    }

    #[test]
    fn test_builtin_name_inside_compound_line_goes_to_executor() {
        let (mut shell, log) = mock_shell(Config::default());
        shell.dispatch("cd /nonexistent ; ls").unwrap();
        assert_eq!(
            *log.borrow(),
            vec![AstNode::Sequence(
                Box::new(cmd("cd", &["/nonexistent"])),
                Box::new(cmd("ls", &[])),
            )]
        );
    }

    #[test]
    fn test_prev_without_history_is_noop() {
        let (mut shell, log) = mock_shell(Config::default());
        assert_eq!(shell.dispatch("prev").unwrap(), ExecOutcome::Code(0));
        assert!(log.borrow().is_empty());
        assert!(shell.prev().is_empty());
    }

    #[test]
    fn test_prev_reruns_last_command() {
        let (mut shell, log) = mock_shell(Config::default());
        shell.dispatch("echo hi").unwrap();
        shell.dispatch("prev").unwrap();
        assert_eq!(*log.borrow(), vec![cmd("echo", &["hi"]), cmd("echo", &["hi"])]);
        assert_eq!(shell.prev().get(), Some("echo hi"));
    }

    #[test]
    fn test_prev_with_arguments_is_usage_error() {
        let (mut shell, log) = mock_shell(Config::default());
        shell.dispatch("echo hi").unwrap();
        let err = shell.dispatch("prev now").unwrap_err();
        assert!(matches!(err, ShellError::Usage { command: "prev", .. }));
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(shell.prev().get(), Some("echo hi"));
    }

    #[test]
    fn test_cd_usage_and_missing_directory_keep_cwd() {
        let (mut shell, _log) = mock_shell(Config::default());
        let before = std::env::current_dir().unwrap();

        let err = shell.dispatch("cd a b").unwrap_err();
        assert!(matches!(err, ShellError::Usage { command: "cd", .. }));
        assert!(!err.is_fatal());

        let err = shell.dispatch("cd /definitely/not/here").unwrap_err();
        assert!(matches!(err, ShellError::NoSuchDirectory { .. }));
        assert!(!err.is_fatal());

        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_source_stops_at_exit() {
        let path = script("exit", &["echo a", "exit", "echo b"]);
        let (mut shell, log) = mock_shell(Config::default());
        let line = format!("source {}", path.display());

        assert_eq!(shell.dispatch(&line).unwrap(), ExecOutcome::Code(0));
        assert_eq!(*log.borrow(), vec![cmd("echo", &["a"])]);
        // the session slot still names the sourced file
        assert_eq!(shell.prev().get(), Some(line.as_str()));
        assert_eq!(shell.source_depth(), 0);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_source_reports_bad_lines_and_continues() {
        let path = script("bad-line", &["ls >", "echo after"]);
        let (mut shell, log) = mock_shell(Config::default());
        shell.dispatch(&format!("source {}", path.display())).unwrap();
        assert_eq!(*log.borrow(), vec![cmd("echo", &["after"])]);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_source_propagates_fatal_errors() {
        let path = script("fatal", &["echo \"open", "echo after"]);
        let (mut shell, log) = mock_shell(Config::default());
        let err = shell.dispatch(&format!("source {}", path.display())).unwrap_err();
        assert!(err.is_fatal());
        assert!(log.borrow().is_empty());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_source_usage_and_missing_file() {
        let (mut shell, _log) = mock_shell(Config::default());
        let err = shell.dispatch("source").unwrap_err();
        assert!(matches!(err, ShellError::Usage { command: "source", .. }));
        let err = shell.dispatch("source /definitely/not/here").unwrap_err();
        assert!(matches!(err, ShellError::Source { .. }));
    }

    #[test]
    fn test_source_nesting_is_bounded() {
        let path = std::env::temp_dir()
            .join(format!("minishell-shell-{}-recursive", std::process::id()));
        fs::write(&path, format!("source {}\necho x\n", path.display())).unwrap();
        let config = Config { max_source_depth: 2, ..Config::default() };
        let (mut shell, log) = mock_shell(config);

        shell.dispatch(&format!("source {}", path.display())).unwrap();
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(shell.source_depth(), 0);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_unterminated_quote_is_fatal() {
        let (mut shell, log) = mock_shell(Config::default());
        let err = shell.dispatch("echo \"abc").unwrap_err();
        assert!(matches!(err, ShellError::Lex(LexError::UnterminatedQuote { pos: 5 })));
        assert!(err.is_fatal());
        assert!(log.borrow().is_empty());
        assert!(shell.prev().is_empty());
    }

    #[test]
    fn test_long_line_is_rejected() {
        let config = Config { max_line_len: 8, ..Config::default() };
        let (mut shell, log) = mock_shell(config);
        let err = shell.dispatch("echo 123456789").unwrap_err();
        assert!(!err.is_fatal());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_parse_error_is_not_recorded() {
        let (mut shell, log) = mock_shell(Config::default());
        let err = shell.dispatch("ls >").unwrap_err();
        assert!(matches!(err, ShellError::Parse(_)));
        assert!(log.borrow().is_empty());
        assert!(shell.prev().is_empty());
    }

    #[test]
    fn test_help_is_recorded() {
        let (mut shell, log) = mock_shell(Config::default());
        shell.dispatch("help").unwrap();
        assert!(log.borrow().is_empty());
        assert_eq!(shell.prev().get(), Some("help"));
    }
}
