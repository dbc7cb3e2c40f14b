//! Error taxonomy shared by every stage of the pipeline.
//!
//! The first error aborts the current parse or generate call; nothing here is
//! recoverable. Located errors can be rendered chibicc-style with a caret
//! pointing at the offending byte via [`CompileError::excerpt`].

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum CompileError {
  /// The statement did not end in `;`.
  #[snafu(display("Expected ';' at the end of the statement"))]
  ExpectedSemicolon { loc: usize },

  /// A factor was neither an identifier nor a number.
  #[snafu(display("Unexpected token: {text}"))]
  UnexpectedToken { text: String, loc: usize },

  /// An operator symbol outside `+ - * /`. The parser never produces one;
  /// only hand-built trees can.
  #[snafu(display("Unknown operator: {symbol}"))]
  UnknownOperator { symbol: String },

  /// The instruction sink rejected a write.
  #[snafu(display("failed to write instruction: {source}"))]
  Emit { source: std::io::Error },
}

impl CompileError {
  /// Byte offset in the source the error points at, if it has one.
  pub fn loc(&self) -> Option<usize> {
    match self {
      Self::ExpectedSemicolon { loc } | Self::UnexpectedToken { loc, .. } => Some(*loc),
      Self::UnknownOperator { .. } | Self::Emit { .. } => None,
    }
  }

  /// Render the quoted source with a caret under the error location,
  /// followed by the message. Unlocated errors render as the bare message.
  pub fn excerpt(&self, source: &str) -> String {
    let Some(loc) = self.loc() else {
      return self.to_string();
    };
    let safe_loc = loc.min(source.len());
    let char_offset = source[..safe_loc].chars().count() + 1; // account for opening quote
    format!("'{source}'\n{}^ {self}", " ".repeat(char_offset))
  }
}
