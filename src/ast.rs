/// A command line after operator resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Nothing to run, e.g. either side of a trailing `;`.
    Empty,
    Command(CommandNode),
    Sequence(Box<AstNode>, Box<AstNode>),
    Redirect {
        node: Box<AstNode>,
        kind: RedirectKind,
        file: String,
    },
    Pipeline(Box<AstNode>, Box<AstNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandNode {
    pub name: String,
    pub args: Vec<String>,
}

impl CommandNode {
    pub fn new(name: impl Into<String>, args: &[&str]) -> Self {
        CommandNode {
            name: name.into(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Program name followed by its arguments.
    pub fn argv(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.args.iter().map(|s| s.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    In,
    Out,
}
