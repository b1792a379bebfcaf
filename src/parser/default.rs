use log::trace;
use crate::ast::{AstNode, CommandNode, RedirectKind};
use crate::lexer::{Operator, Token, TokenKind};
use crate::parser::{ParseError, Parser};
use super::scan;

/// Splits a token sequence around its highest-priority operator and
/// recurses into both sides.
pub struct OperatorParser<'a> {
    tokens: &'a [Token],
}

impl<'a> OperatorParser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens }
    }
}

impl<'a> Parser for OperatorParser<'a> {
    fn parse(&mut self) -> Result<AstNode, ParseError> {
        parse_slice(self.tokens)
    }
}

fn parse_slice(tokens: &[Token]) -> Result<AstNode, ParseError> {
    if tokens.is_empty() {
        return Ok(AstNode::Empty);
    }

    let Some((op, idx)) = scan::find_operator(tokens) else {
        return Ok(AstNode::Command(command_from(tokens)));
    };
    trace!("split on '{}' at token {}", op, idx);

    let (left, right) = scan::split_around(tokens, idx);
    match op {
        Operator::Sequence => Ok(AstNode::Sequence(
            Box::new(parse_slice(left)?),
            Box::new(parse_slice(right)?),
        )),
        Operator::RedirectIn => parse_redirect(&tokens[idx], RedirectKind::In, left, right),
        Operator::RedirectOut => parse_redirect(&tokens[idx], RedirectKind::Out, left, right),
        Operator::Pipe => {
            trace!("pipeline with {} stage(s)", scan::count_operator(tokens, Operator::Pipe) + 1);
            Ok(AstNode::Pipeline(
                Box::new(parse_slice(left)?),
                Box::new(parse_slice(right)?),
            ))
        }
    }
}

// The first token right of the operator names the file; whatever follows it
// still belongs to the redirected command.
fn parse_redirect(
    op_token: &Token,
    kind: RedirectKind,
    left: &[Token],
    right: &[Token],
) -> Result<AstNode, ParseError> {
    let Some((target, rest)) = right.split_first() else {
        return Err(ParseError::MissingRedirectTarget {
            op: op_token.lexeme.clone(),
            pos: op_token.span.0,
        });
    };
    if target.kind != TokenKind::Word {
        return Err(ParseError::UnexpectedToken {
            found: target.lexeme.clone(),
            pos: target.span.0,
        });
    }

    let inner = if rest.is_empty() {
        parse_slice(left)?
    } else {
        let joined: Vec<Token> = left.iter().chain(rest).cloned().collect();
        parse_slice(&joined)?
    };

    Ok(AstNode::Redirect {
        node: Box::new(inner),
        kind,
        file: target.lexeme.clone(),
    })
}

fn command_from(tokens: &[Token]) -> CommandNode {
    CommandNode {
        name: tokens[0].lexeme.clone(),
        args: tokens[1..].iter().map(|t| t.lexeme.clone()).collect(),
    }
}
