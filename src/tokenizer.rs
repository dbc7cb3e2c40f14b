//! Lexical analysis: a pull-based scanner over the source string.
//!
//! The lexer knows nothing about the grammar. It classifies one token per
//! call to [`Lexer::next_token`] and never fails; characters it does not
//! recognise come back as [`TokenKind::Unknown`] for the parser to reject.

use tracing::trace;

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  Identifier,
  Number,
  /// Lexed but not accepted by any grammar rule.
  Assign,
  Plus,
  Minus,
  Mult,
  Div,
  Semicolon,
  EndOfFile,
  Unknown,
}

/// A classified slice of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
  pub kind: TokenKind,
  pub text: &'a str,
  /// Byte offset of `text` in the source.
  pub loc: usize,
}

impl<'a> Token<'a> {
  pub fn new(kind: TokenKind, text: &'a str, loc: usize) -> Self {
    Self { kind, text, loc }
  }

  /// Human-friendly description used in diagnostics.
  pub fn describe(&self) -> &'a str {
    match self.kind {
      TokenKind::EndOfFile => "EOF",
      _ => self.text,
    }
  }
}

/// Forward-only cursor over an immutable source string.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
  source: &'a str,
  pos: usize,
}

impl<'a> Lexer<'a> {
  pub fn new(source: &'a str) -> Self {
    Self { source, pos: 0 }
  }

  pub fn source(&self) -> &'a str {
    self.source
  }

  /// Scan the next token. Once the input is exhausted every call returns
  /// `EndOfFile` with empty text.
  pub fn next_token(&mut self) -> Token<'a> {
    self.skip_whitespace();
    let token = self.scan();
    trace!(kind = ?token.kind, text = token.describe(), loc = token.loc, "token");
    token
  }

  fn scan(&mut self) -> Token<'a> {
    let start = self.pos;
    let Some(c) = self.source[start..].chars().next() else {
      return Token::new(TokenKind::EndOfFile, "", self.source.len());
    };

    if c.is_ascii_alphabetic() {
      return self.scan_while(TokenKind::Identifier, |b| b.is_ascii_alphanumeric());
    }
    if c.is_ascii_digit() {
      return self.scan_while(TokenKind::Number, |b| b.is_ascii_digit());
    }

    self.pos += c.len_utf8();
    let kind = match c {
      '=' => TokenKind::Assign,
      '+' => TokenKind::Plus,
      '-' => TokenKind::Minus,
      '*' => TokenKind::Mult,
      '/' => TokenKind::Div,
      ';' => TokenKind::Semicolon,
      _ => TokenKind::Unknown,
    };
    Token::new(kind, &self.source[start..self.pos], start)
  }

  /// Consume the maximal run of bytes matching `accept` starting at the cursor.
  fn scan_while(&mut self, kind: TokenKind, accept: impl Fn(u8) -> bool) -> Token<'a> {
    let start = self.pos;
    let bytes = self.source.as_bytes();
    while self.pos < bytes.len() && accept(bytes[self.pos]) {
      self.pos += 1;
    }
    Token::new(kind, &self.source[start..self.pos], start)
  }

  fn skip_whitespace(&mut self) {
    let bytes = self.source.as_bytes();
    while self.pos < bytes.len() && is_space(bytes[self.pos]) {
      self.pos += 1;
    }
  }
}

/// C `isspace`: unlike `u8::is_ascii_whitespace` this accepts vertical tab.
fn is_space(b: u8) -> bool {
  matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

#[cfg(test)]
mod tests {
  use super::*;

  fn kinds(source: &str) -> Vec<(TokenKind, &str)> {
    let mut lexer = Lexer::new(source);
    let mut out = Vec::new();
    loop {
      let token = lexer.next_token();
      out.push((token.kind, token.text));
      if token.kind == TokenKind::EndOfFile {
        return out;
      }
    }
  }

  #[test]
  fn classifies_statement() {
    assert_eq!(
      kinds(" x1 = 42*y /7-z+0;"),
      vec![
        (TokenKind::Identifier, "x1"),
        (TokenKind::Assign, "="),
        (TokenKind::Number, "42"),
        (TokenKind::Mult, "*"),
        (TokenKind::Identifier, "y"),
        (TokenKind::Div, "/"),
        (TokenKind::Number, "7"),
        (TokenKind::Minus, "-"),
        (TokenKind::Identifier, "z"),
        (TokenKind::Plus, "+"),
        (TokenKind::Number, "0"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::EndOfFile, ""),
      ]
    );
  }

  #[test]
  fn number_then_letters_splits() {
    assert_eq!(
      kinds("12ab"),
      vec![
        (TokenKind::Number, "12"),
        (TokenKind::Identifier, "ab"),
        (TokenKind::EndOfFile, ""),
      ]
    );
  }

  #[test]
  fn unknown_characters_are_single_tokens() {
    assert_eq!(
      kinds("(é"),
      vec![
        (TokenKind::Unknown, "("),
        (TokenKind::Unknown, "é"),
        (TokenKind::EndOfFile, ""),
      ]
    );
  }

  #[test]
  fn end_of_file_is_sticky() {
    let mut lexer = Lexer::new("  \t\x0b\n ");
    for _ in 0..3 {
      let token = lexer.next_token();
      assert_eq!(token.kind, TokenKind::EndOfFile);
      assert_eq!(token.text, "");
      assert_eq!(token.loc, lexer.source().len());
    }
  }

  #[test]
  fn records_offsets() {
    let mut lexer = Lexer::new("  ab + 3");
    assert_eq!(lexer.next_token().loc, 2);
    assert_eq!(lexer.next_token().loc, 5);
    assert_eq!(lexer.next_token().loc, 7);
  }

  #[test]
  fn describe_names_end_of_file() {
    let mut lexer = Lexer::new("q");
    assert_eq!(lexer.next_token().describe(), "q");
    assert_eq!(lexer.next_token().describe(), "EOF");
  }
}
