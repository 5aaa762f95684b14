use std::fmt;

/// Classification of a [`Token`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Newline,
    Number,
    Ident,
    String,

    Label,
    Goto,
    Print,
    Input,
    Let,
    If,
    Then,
    EndIf,
    While,
    Repeat,
    EndWhile,

    /// `=`
    Eq,
    Plus,
    Minus,
    Asterisk,
    Slash,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl TokenKind {
    /// The upper-case name of the kind, as used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Number => "NUMBER",
            TokenKind::Ident => "IDENT",
            TokenKind::String => "STRING",
            TokenKind::Label => "LABEL",
            TokenKind::Goto => "GOTO",
            TokenKind::Print => "PRINT",
            TokenKind::Input => "INPUT",
            TokenKind::Let => "LET",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::EndIf => "ENDIF",
            TokenKind::While => "WHILE",
            TokenKind::Repeat => "REPEAT",
            TokenKind::EndWhile => "ENDWHILE",
            TokenKind::Eq => "EQ",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Slash => "SLASH",
            TokenKind::EqEq => "EQEQ",
            TokenKind::NotEq => "NOTEQ",
            TokenKind::Lt => "LT",
            TokenKind::LtEq => "LTEQ",
            TokenKind::Gt => "GT",
            TokenKind::GtEq => "GTEQ",
        }
    }

    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Label
                | TokenKind::Goto
                | TokenKind::Print
                | TokenKind::Input
                | TokenKind::Let
                | TokenKind::If
                | TokenKind::Then
                | TokenKind::EndIf
                | TokenKind::While
                | TokenKind::Repeat
                | TokenKind::EndWhile
        )
    }

    /// `==`, `!=`, `<`, `<=`, `>` or `>=`.
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::LtEq
                | TokenKind::Gt
                | TokenKind::GtEq
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified piece of source text.
///
/// For strings, `text` holds the body without the surrounding quotes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "")
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

pub static KEYWORDS: phf::Map<&'static str, TokenKind> = phf::phf_map! {
    "LABEL" => TokenKind::Label,
    "GOTO" => TokenKind::Goto,
    "PRINT" => TokenKind::Print,
    "INPUT" => TokenKind::Input,
    "LET" => TokenKind::Let,
    "IF" => TokenKind::If,
    "THEN" => TokenKind::Then,
    "ENDIF" => TokenKind::EndIf,
    "WHILE" => TokenKind::While,
    "REPEAT" => TokenKind::Repeat,
    "ENDWHILE" => TokenKind::EndWhile,
};
