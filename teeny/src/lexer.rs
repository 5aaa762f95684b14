use log::trace;
use logos::Logos;
use thiserror::Error;

use crate::error::{CompilationError, CompileResult};
use crate::token::{KEYWORDS, Token, TokenKind};

#[derive(Error, Debug, Clone, PartialEq, Default)]
pub enum LexError {
    #[error("illegal character in number")]
    MalformedNumber,
    #[error("expected `!=`, got a lone `!`")]
    BareBang,
    #[error("illegal character in string")]
    IllegalStringChar,
    #[default]
    #[error("unknown character")]
    UnknownCharacter,
}

fn malformed_number(_: &mut logos::Lexer<Lexeme>) -> Result<(), LexError> {
    Err(LexError::MalformedNumber)
}

fn bare_bang(_: &mut logos::Lexer<Lexeme>) -> Result<(), LexError> {
    Err(LexError::BareBang)
}

fn illegal_string(_: &mut logos::Lexer<Lexeme>) -> Result<(), LexError> {
    Err(LexError::IllegalStringChar)
}

/// Raw scan result. Words are split into keywords and identifiers afterwards,
/// through [`KEYWORDS`].
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"#[^\n]*")]
enum Lexeme {
    #[token("\n")]
    Newline,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    #[regex(r"[0-9]+\.", malformed_number)]
    Number,

    // The body ends up inside a `printf` format string, so anything that
    // would change its meaning there is rejected.
    #[regex(r#""[^"\r\n\t\\%]*""#)]
    #[regex(r#""[^"\r\n\t\\%]*"#, illegal_string)]
    String,

    #[regex(r"[a-zA-Z]+")]
    Word,

    #[token("=")]
    Eq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("==")]
    EqEq,
    #[token("!=")]
    #[token("!", bare_bang)]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
}

/// Pull-based tokenizer over a source text.
///
/// Once the input is exhausted every call yields an `EOF` token.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, Lexeme>,
    exhausted: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: Lexeme::lexer(source),
            exhausted: false,
        }
    }

    /// Returns the next token, advancing past it.
    pub fn next_token(&mut self) -> CompileResult<Token> {
        if self.exhausted {
            return Ok(Token::eof());
        }

        let token = match self.inner.next() {
            Some(Ok(lexeme)) => self.classify(lexeme),
            Some(Err(source)) => return Err(self.lex_error(source)),
            None => {
                self.exhausted = true;
                Token::eof()
            }
        };

        trace!("token {} {:?}", token.kind, token.text);
        Ok(token)
    }

    fn classify(&self, lexeme: Lexeme) -> Token {
        let text = self.inner.slice();
        let kind = match lexeme {
            Lexeme::Newline => TokenKind::Newline,
            Lexeme::Number => TokenKind::Number,
            Lexeme::String => {
                // strip the quotes
                return Token::new(TokenKind::String, &text[1..text.len() - 1]);
            }
            Lexeme::Word => match KEYWORDS.get(text).copied() {
                Some(keyword) => {
                    debug_assert!(keyword.is_keyword());
                    keyword
                }
                None => TokenKind::Ident,
            },
            Lexeme::Eq => TokenKind::Eq,
            Lexeme::Plus => TokenKind::Plus,
            Lexeme::Minus => TokenKind::Minus,
            Lexeme::Asterisk => TokenKind::Asterisk,
            Lexeme::Slash => TokenKind::Slash,
            Lexeme::EqEq => TokenKind::EqEq,
            Lexeme::NotEq => TokenKind::NotEq,
            Lexeme::Lt => TokenKind::Lt,
            Lexeme::LtEq => TokenKind::LtEq,
            Lexeme::Gt => TokenKind::Gt,
            Lexeme::GtEq => TokenKind::GtEq,
        };
        Token::new(kind, text)
    }

    fn lex_error(&mut self, source: LexError) -> CompilationError {
        self.exhausted = true;

        let mut text = self.inner.slice().to_string();
        // Point at the character that broke the pattern, if there is one.
        if source != LexError::UnknownCharacter {
            if let Some(c) = self.inner.remainder().chars().next() {
                text.push(c);
            }
        }
        CompilationError::Lex { text, source }
    }
}

/// Lexes the whole source, up to and including the `EOF` token.
pub fn tokenize(source: &str) -> CompileResult<Vec<Token>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.is_eof();
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
