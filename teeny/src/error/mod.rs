use thiserror::Error;

use crate::lexer::LexError;

pub type CompileResult<T> = Result<T, CompilationError>;

#[derive(Error, Debug)]
pub enum CompilationError {
    #[error("Lexing error: {source} at {text:?}")]
    Lex { text: String, source: LexError },

    #[error("Failed to parse: {0}")]
    ParseError(String),

    #[error("Label already exists: {0}")]
    DuplicateLabel(String),

    #[error("Referencing variable before assignment: {0}")]
    UndeclaredVariable(String),

    #[error("Attempting to GOTO to undeclared label: {0}")]
    UndeclaredLabel(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Helper macro to create a `CompilationError::ParseError`
#[macro_export]
macro_rules! parse_error {
    ( $($arg:tt)* ) => {
        $crate::error::CompilationError::ParseError(format!($($arg)*))
    };
}
