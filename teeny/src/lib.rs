//! Compiler from Teeny Tiny, a small BASIC-like language, to C.
//!
//! Translation is a single pass: the [`parser::Parser`] pulls tokens from the
//! [`lexer::Lexer`] and writes C into an [`emitter::Emitter`] as it goes.

pub mod emitter;
pub mod error;
pub mod frontend;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::{CompilationError, CompileResult};
pub use token::{Token, TokenKind};

/// Compiles Teeny Tiny source text into the text of a C program.
pub fn compile(source: &str) -> CompileResult<String> {
    parser::Parser::new(source)?.program()
}
