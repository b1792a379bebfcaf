pub mod default;
pub mod scan;

use std::fmt;
use crate::ast::AstNode;

pub use default::OperatorParser;

pub trait Parser {
    fn parse(&mut self) -> Result<AstNode, ParseError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    MissingRedirectTarget {
        op: String,
        pos: usize,
    },
    UnexpectedToken {
        found: String,
        pos: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingRedirectTarget { op, pos } => {
                write!(f, "Missing file name after '{}' at position {}", op, pos)
            }
            ParseError::UnexpectedToken { found, pos } => {
                write!(f, "Unexpected token '{}' at position {}. Expected: a file name", found, pos)
            }
        }
    }
}

impl std::error::Error for ParseError {}
