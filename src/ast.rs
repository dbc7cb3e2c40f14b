//! Expression tree produced by the parser.
//!
//! A node is either a leaf operand or a binary operation with exactly two
//! boxed children, so no other arity can be represented.

use std::fmt;

use crate::error::{CompileResult, UnknownOperatorSnafu};

/// Binary operators recognised by the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
}

impl BinaryOp {
  /// Map an operator symbol to its operator. Anything outside `+ - * /` is
  /// rejected with `CompileError::UnknownOperator`.
  pub fn from_symbol(symbol: &str) -> CompileResult<Self> {
    match symbol {
      "+" => Ok(Self::Add),
      "-" => Ok(Self::Sub),
      "*" => Ok(Self::Mul),
      "/" => Ok(Self::Div),
      _ => UnknownOperatorSnafu { symbol }.fail(),
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      Self::Add => "+",
      Self::Sub => "-",
      Self::Mul => "*",
      Self::Div => "/",
    }
  }
}

impl fmt::Display for BinaryOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.symbol())
  }
}

/// Left folds in the parser build spines as deep as the operator count, so
/// every walk over the tree below uses an explicit stack instead of recursion.
#[derive(Debug)]
pub enum AstNode {
  /// Identifier or numeric literal, kept as its source text.
  Leaf { value: String },
  Binary {
    op: BinaryOp,
    lhs: Box<AstNode>,
    rhs: Box<AstNode>,
  },
}

impl AstNode {
  pub fn leaf(value: impl Into<String>) -> Self {
    Self::Leaf {
      value: value.into(),
    }
  }

  pub fn binary(op: BinaryOp, lhs: AstNode, rhs: AstNode) -> Self {
    Self::Binary {
      op,
      lhs: Box::new(lhs),
      rhs: Box::new(rhs),
    }
  }

  /// Pre-order iterator over this node and all of its descendants.
  pub fn nodes(&self) -> Nodes<'_> {
    Nodes { stack: vec![self] }
  }

  pub fn leaf_count(&self) -> usize {
    self
      .nodes()
      .filter(|node| matches!(node, Self::Leaf { .. }))
      .count()
  }

  pub fn operator_count(&self) -> usize {
    self
      .nodes()
      .filter(|node| matches!(node, Self::Binary { .. }))
      .count()
  }

  /// Detach both children, leaving empty leaves behind.
  fn take_children(&mut self) -> Option<(AstNode, AstNode)> {
    match self {
      Self::Leaf { .. } => None,
      Self::Binary { lhs, rhs, .. } => Some((
        std::mem::replace(lhs.as_mut(), AstNode::leaf(String::new())),
        std::mem::replace(rhs.as_mut(), AstNode::leaf(String::new())),
      )),
    }
  }
}

pub struct Nodes<'n> {
  stack: Vec<&'n AstNode>,
}

impl<'n> Iterator for Nodes<'n> {
  type Item = &'n AstNode;

  fn next(&mut self) -> Option<Self::Item> {
    let node = self.stack.pop()?;
    if let AstNode::Binary { lhs, rhs, .. } = node {
      self.stack.push(rhs.as_ref());
      self.stack.push(lhs.as_ref());
    }
    Some(node)
  }
}

impl Drop for AstNode {
  fn drop(&mut self) {
    let Some((lhs, rhs)) = self.take_children() else {
      return;
    };
    let mut pending = vec![lhs, rhs];
    while let Some(mut node) = pending.pop() {
      if let Some((lhs, rhs)) = node.take_children() {
        pending.push(lhs);
        pending.push(rhs);
      }
    }
  }
}

impl PartialEq for AstNode {
  fn eq(&self, other: &Self) -> bool {
    let mut pairs = vec![(self, other)];
    while let Some(pair) = pairs.pop() {
      match pair {
        (Self::Leaf { value: a }, Self::Leaf { value: b }) => {
          if a != b {
            return false;
          }
        }
        (
          Self::Binary { op, lhs, rhs },
          Self::Binary {
            op: other_op,
            lhs: other_lhs,
            rhs: other_rhs,
          },
        ) => {
          if op != other_op {
            return false;
          }
          pairs.push((rhs.as_ref(), other_rhs.as_ref()));
          pairs.push((lhs.as_ref(), other_lhs.as_ref()));
        }
        _ => return false,
      }
    }
    true
  }
}

impl Eq for AstNode {}

/// Fully parenthesised infix form, handy in logs and test failures.
impl fmt::Display for AstNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    enum Piece<'n> {
      Node(&'n AstNode),
      Text(&'static str),
      Op(BinaryOp),
    }

    let mut pieces = vec![Piece::Node(self)];
    while let Some(piece) = pieces.pop() {
      match piece {
        Piece::Node(AstNode::Leaf { value }) => f.write_str(value)?,
        Piece::Node(AstNode::Binary { op, lhs, rhs }) => {
          f.write_str("(")?;
          pieces.push(Piece::Text(")"));
          pieces.push(Piece::Node(rhs.as_ref()));
          pieces.push(Piece::Op(*op));
          pieces.push(Piece::Node(lhs.as_ref()));
        }
        Piece::Text(text) => f.write_str(text)?,
        Piece::Op(op) => write!(f, " {op} ")?,
      }
    }
    Ok(())
  }
}
