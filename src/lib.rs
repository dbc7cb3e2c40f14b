//! Crate root: wires together the compilation pipeline.
//!
//! - `tokenizer` performs lexical analysis, one token per pull.
//! - `parser` owns all syntactic knowledge and returns the statement's AST.
//! - `ast` is the tree the two ends agree on.
//! - `codegen` lowers the tree into stack-machine instructions.
//! - `error` holds the error taxonomy shared by the other modules.

pub mod ast;
pub mod codegen;
pub mod error;
pub mod parser;
pub mod tokenizer;

use std::io::Write;

pub use ast::{AstNode, BinaryOp};
pub use codegen::{CodeGenerator, Instruction};
pub use error::{CompileError, CompileResult, EmitSnafu};

/// Compile a source statement, streaming instructions into `out`.
///
/// The whole statement is parsed before anything is written, so a syntax
/// error leaves `out` untouched.
pub fn compile_to<W: Write>(source: &str, out: &mut W) -> CompileResult<()> {
  let program = parser::parse(source)?;
  CodeGenerator::new().generate(&program, out)
}

/// Compile a source statement into a newline-terminated instruction listing.
pub fn compile(source: &str) -> CompileResult<String> {
  let mut out = Vec::new();
  compile_to(source, &mut out)?;
  Ok(String::from_utf8_lossy(&out).into_owned())
}
