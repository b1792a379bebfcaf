use std::fmt;
use super::token::{Operator, Token, TokenKind};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum LexError {
    UnterminatedQuote { pos: usize },
    LineTooLong { len: usize, max: usize },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnterminatedQuote { pos } => {
                write!(f, "Unterminated quote '\"' starting at position {}", pos)
            }
            LexError::LineTooLong { len, max } => {
                write!(f, "Line too long: {} bytes (limit is {})", len, max)
            }
        }
    }
}

impl std::error::Error for LexError {}

pub struct Lexer<'a> {
    input: &'a str,
    max_len: Option<usize>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            max_len: None,
        }
    }

    /// Reject lines longer than `max` bytes instead of scanning them.
    pub fn with_max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    pub fn tokenize(&self) -> Result<Vec<Token>, LexError> {
        if let Some(max) = self.max_len {
            if self.input.len() > max {
                return Err(LexError::LineTooLong {
                    len: self.input.len(),
                    max,
                });
            }
        }

        let mut tokens = Vec::new();
        let mut buf = String::new();
        let mut token_start = 0;
        let mut chars = self.input.char_indices().peekable();

        while let Some((pos, ch)) = chars.next() {
            match ch {
                ' ' => flush_word(&mut tokens, &mut buf, token_start, pos),
                // `\t` written out as two characters separates words like a space
                '\\' if matches!(chars.peek(), Some((_, 't'))) => {
                    flush_word(&mut tokens, &mut buf, token_start, pos);
                    chars.next();
                }
                '"' => {
                    flush_word(&mut tokens, &mut buf, token_start, pos);
                    let mut quoted = String::new();
                    let mut closing = None;
                    for (qpos, qc) in chars.by_ref() {
                        if qc == '"' {
                            closing = Some(qpos);
                            break;
                        }
                        quoted.push(qc);
                    }
                    let Some(close) = closing else {
                        return Err(LexError::UnterminatedQuote { pos });
                    };
                    if !quoted.is_empty() {
                        tokens.push(Token::word(quoted, (pos + 1, close)));
                    }
                }
                '(' | ')' => {
                    flush_word(&mut tokens, &mut buf, token_start, pos);
                    let kind = if ch == '(' { TokenKind::LParen } else { TokenKind::RParen };
                    tokens.push(Token {
                        kind,
                        lexeme: ch.to_string(),
                        span: (pos, pos + 1),
                    });
                }
                _ => {
                    if let Some(op) = Operator::from_char(ch) {
                        flush_word(&mut tokens, &mut buf, token_start, pos);
                        tokens.push(Token {
                            kind: TokenKind::Operator(op),
                            lexeme: ch.to_string(),
                            span: (pos, pos + 1),
                        });
                    } else {
                        if buf.is_empty() {
                            token_start = pos;
                        }
                        buf.push(ch);
                    }
                }
            }
        }

        flush_word(&mut tokens, &mut buf, token_start, self.input.len());
        Ok(tokens)
    }
}

fn flush_word(tokens: &mut Vec<Token>, buf: &mut String, start: usize, end: usize) {
    if !buf.is_empty() {
        tokens.push(Token::word(std::mem::take(buf), (start, end)));
    }
}
