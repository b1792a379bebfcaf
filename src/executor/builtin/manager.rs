use std::collections::HashMap;
use crate::error::ShellError;
use crate::executor::ExecOutcome;
use crate::shell::Shell;
use super::commands::{
    CdCommand,
    ExitCommand,
    HelpCommand,
    PrevCommand,
    SourceCommand,
};

pub type BuiltinStatus = Result<ExecOutcome, ShellError>;

/// A command run inside the shell process instead of a child.
pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    fn run(&self, args: &[String], shell: &mut Shell) -> BuiltinStatus;
}

pub struct BuiltinManager {
    commands: HashMap<String, Box<dyn BuiltinCommand>>,
}

impl BuiltinManager {
    pub fn new() -> Self {
        let mut mgr = BuiltinManager {
            commands: HashMap::new(),
        };
        mgr.register(Box::new(ExitCommand {}));
        mgr.register(Box::new(CdCommand {}));
        mgr.register(Box::new(SourceCommand {}));
        mgr.register(Box::new(PrevCommand {}));
        mgr.register(Box::new(HelpCommand {}));
        mgr
    }

    fn register(&mut self, cmd: Box<dyn BuiltinCommand>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    pub fn get(&self, name: &str) -> Option<&dyn BuiltinCommand> {
        self.commands.get(name).map(|cmd| cmd.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let mgr = BuiltinManager::new();
        for name in ["exit", "cd", "source", "prev", "help"] {
            assert_eq!(mgr.get(name).map(|cmd| cmd.name()), Some(name));
        }
        assert!(mgr.get("ls").is_none());
        assert!(mgr.get("").is_none());
    }
}
