//! Code generation: lower the parsed AST into stack-machine instructions.
//!
//! Every leaf pushes one value and every operator pops two and pushes one, so
//! a post-order walk yields a valid program with no registers or temporaries.
//! Instructions are streamed to the sink as they are produced.

use std::fmt;
use std::io::Write;

use snafu::ResultExt;
use tracing::trace;

use crate::ast::{AstNode, BinaryOp};
use crate::error::{CompileResult, EmitSnafu};

/// One line of the instruction stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction<'n> {
  Load(&'n str),
  Add,
  Sub,
  Mul,
  Div,
}

impl From<BinaryOp> for Instruction<'_> {
  fn from(op: BinaryOp) -> Self {
    // Exhaustive over `BinaryOp`: an unknown operator cannot reach codegen,
    // it is rejected by `BinaryOp::from_symbol` when the tree is built.
    match op {
      BinaryOp::Add => Self::Add,
      BinaryOp::Sub => Self::Sub,
      BinaryOp::Mul => Self::Mul,
      BinaryOp::Div => Self::Div,
    }
  }
}

impl fmt::Display for Instruction<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Load(value) => write!(f, "LOAD {value}"),
      Self::Add => f.write_str("ADD"),
      Self::Sub => f.write_str("SUB"),
      Self::Mul => f.write_str("MUL"),
      Self::Div => f.write_str("DIV"),
    }
  }
}

/// Stateless tree walker; one instance may serve any number of roots.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeGenerator;

impl CodeGenerator {
  pub fn new() -> Self {
    Self
  }

  /// Emit the instructions for `node` to `out`, one per line.
  ///
  /// The walk keeps its own work list: an operator is pushed back once when
  /// first seen and emitted on the second visit, after both operands.
  pub fn generate<W: Write>(&self, node: &AstNode, out: &mut W) -> CompileResult<()> {
    let mut work: Vec<(&AstNode, bool)> = vec![(node, false)];
    while let Some((node, operands_done)) = work.pop() {
      match node {
        AstNode::Leaf { value } => emit(out, Instruction::Load(value))?,
        AstNode::Binary { op, .. } if operands_done => emit(out, Instruction::from(*op))?,
        AstNode::Binary { lhs, rhs, .. } => {
          work.push((node, true));
          work.push((rhs.as_ref(), false));
          work.push((lhs.as_ref(), false));
        }
      }
    }
    Ok(())
  }
}

fn emit<W: Write>(out: &mut W, inst: Instruction<'_>) -> CompileResult<()> {
  trace!(%inst, "emit");
  writeln!(out, "{inst}").context(EmitSnafu)
}
