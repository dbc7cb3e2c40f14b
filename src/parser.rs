//! Recursive-descent parser for a single expression statement.
//!
//! ```text
//! statement  := expression ';'
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := IDENTIFIER | NUMBER
//! ```
//!
//! Precedence falls out of the two tiers and left-associativity out of the
//! fold in each tier loop. Tokens are pulled from the lexer one at a time with
//! a single token of lookahead.

use tracing::debug;

use crate::ast::{AstNode, BinaryOp};
use crate::error::{CompileResult, ExpectedSemicolonSnafu, UnexpectedTokenSnafu};
use crate::tokenizer::{Lexer, Token, TokenKind};

/// Lex and parse one statement from `source`.
pub fn parse(source: &str) -> CompileResult<AstNode> {
  let mut lexer = Lexer::new(source);
  Parser::new(&mut lexer).parse()
}

pub struct Parser<'l, 'a> {
  lexer: &'l mut Lexer<'a>,
  current: Token<'a>,
}

impl<'l, 'a> Parser<'l, 'a> {
  /// Borrow the lexer for the parser's lifetime and prime the lookahead.
  pub fn new(lexer: &'l mut Lexer<'a>) -> Self {
    let current = lexer.next_token();
    Self { lexer, current }
  }

  /// Parse exactly one statement. Tokens after its `;` are never inspected.
  pub fn parse(&mut self) -> CompileResult<AstNode> {
    let node = self.parse_statement()?;
    debug!(
      tree = %node,
      leaves = node.leaf_count(),
      operators = node.operator_count(),
      "parsed statement"
    );
    Ok(node)
  }

  fn advance(&mut self) {
    self.current = self.lexer.next_token();
  }

  fn parse_statement(&mut self) -> CompileResult<AstNode> {
    let node = self.parse_expression()?;
    if self.current.kind != TokenKind::Semicolon {
      return ExpectedSemicolonSnafu {
        loc: self.current.loc,
      }
      .fail();
    }
    self.advance();
    Ok(node)
  }

  fn parse_expression(&mut self) -> CompileResult<AstNode> {
    let mut node = self.parse_term()?;

    loop {
      let op = match self.current.kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        _ => break,
      };
      self.advance();
      let rhs = self.parse_term()?;
      node = AstNode::binary(op, node, rhs);
    }

    Ok(node)
  }

  fn parse_term(&mut self) -> CompileResult<AstNode> {
    let mut node = self.parse_factor()?;

    loop {
      let op = match self.current.kind {
        TokenKind::Mult => BinaryOp::Mul,
        TokenKind::Div => BinaryOp::Div,
        _ => break,
      };
      self.advance();
      let rhs = self.parse_factor()?;
      node = AstNode::binary(op, node, rhs);
    }

    Ok(node)
  }

  fn parse_factor(&mut self) -> CompileResult<AstNode> {
    match self.current.kind {
      TokenKind::Number | TokenKind::Identifier => {
        let node = AstNode::leaf(self.current.text);
        self.advance();
        Ok(node)
      }
      _ => UnexpectedTokenSnafu {
        text: self.current.text,
        loc: self.current.loc,
      }
      .fail(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::CompileError;

  fn leaf(value: &str) -> AstNode {
    AstNode::leaf(value)
  }

  #[test]
  fn single_leaf() {
    assert_eq!(parse("42;").unwrap(), leaf("42"));
  }

  #[test]
  fn subtraction_is_left_associative() {
    let expected = AstNode::binary(
      BinaryOp::Sub,
      AstNode::binary(BinaryOp::Sub, leaf("3"), leaf("4")),
      leaf("5"),
    );
    assert_eq!(parse("3-4-5;").unwrap(), expected);
  }

  #[test]
  fn multiplication_binds_tighter() {
    let expected = AstNode::binary(
      BinaryOp::Add,
      leaf("3"),
      AstNode::binary(BinaryOp::Mul, leaf("4"), leaf("5")),
    );
    assert_eq!(parse(" 3 + 4 * 5;").unwrap(), expected);
    assert_eq!(
      parse("a / b * c - d;").unwrap().to_string(),
      "(((a / b) * c) - d)"
    );
  }

  #[test]
  fn missing_semicolon() {
    let err = parse("3+4").unwrap_err();
    assert!(matches!(err, CompileError::ExpectedSemicolon { loc: 3 }));
  }

  #[test]
  fn stray_token_before_semicolon() {
    let err = parse("3 4;").unwrap_err();
    assert!(matches!(err, CompileError::ExpectedSemicolon { loc: 2 }));
  }

  #[test]
  fn operator_without_operand() {
    let err = parse("3+;").unwrap_err();
    match err {
      CompileError::UnexpectedToken { text, loc } => {
        assert_eq!(text, ";");
        assert_eq!(loc, 2);
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn premature_end_of_input() {
    let err = parse("x *").unwrap_err();
    assert!(matches!(err, CompileError::UnexpectedToken { ref text, loc: 3 } if text.is_empty()));
    assert_eq!(err.to_string(), "Unexpected token: ");
  }

  #[test]
  fn assign_is_lexed_but_not_parsed() {
    let err = parse("x = 3;").unwrap_err();
    assert!(matches!(err, CompileError::UnexpectedToken { ref text, .. } if text == "="));
  }

  #[test]
  fn unknown_token_rejected_at_factor() {
    let err = parse("(1);").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected token: (");
  }

  #[test]
  fn trailing_input_after_statement_is_ignored() {
    assert_eq!(parse("a; b $").unwrap(), leaf("a"));
  }

  #[test]
  fn parser_borrows_caller_lexer() {
    let mut lexer = Lexer::new("a*b; c");
    let node = Parser::new(&mut lexer).parse().unwrap();
    assert_eq!(node.to_string(), "(a * b)");
    // `c` was pulled as lookahead after the semicolon.
    assert_eq!(lexer.next_token().kind, TokenKind::EndOfFile);
  }
}
