use std::fmt;

/// Control operators recognized outside quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Sequence,    // ;
    RedirectIn,  // <
    RedirectOut, // >
    Pipe,        // |
}

impl Operator {
    /// Resolution order used when deciding which operator splits a line.
    pub const PRIORITY: [Operator; 4] = [
        Operator::Sequence,
        Operator::RedirectIn,
        Operator::RedirectOut,
        Operator::Pipe,
    ];

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            ';' => Some(Operator::Sequence),
            '<' => Some(Operator::RedirectIn),
            '>' => Some(Operator::RedirectOut),
            '|' => Some(Operator::Pipe),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Operator::Sequence => ';',
            Operator::RedirectIn => '<',
            Operator::RedirectOut => '>',
            Operator::Pipe => '|',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,               // Plain or quoted text
    Operator(Operator), // ; < > |
    LParen,             // (
    RParen,             // )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,       // Never empty
    pub span: (usize, usize), // Byte offsets [start, end)
}

impl Token {
    pub fn word(lexeme: impl Into<String>, span: (usize, usize)) -> Self {
        Token {
            kind: TokenKind::Word,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn operator(&self) -> Option<Operator> {
        match self.kind {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        }
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        self.operator() == Some(op)
    }

    /// True for the unquoted or quoted word `text`.
    pub fn is_word(&self, text: &str) -> bool {
        self.kind == TokenKind::Word && self.lexeme == text
    }
}
