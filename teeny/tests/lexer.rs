use pretty_assertions::assert_eq;
use teeny::CompilationError;
use teeny::lexer::{LexError, Lexer, tokenize};
use teeny::token::{KEYWORDS, Token, TokenKind};

use TokenKind::{
    Asterisk, Eof, Eq, EqEq, EndIf, EndWhile, Gt, GtEq, Ident, If, Let, Lt, LtEq, Minus, Newline,
    NotEq, Number, Plus, Print, Slash, Then,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[track_caller]
fn assert_lex_error(input: &str, expected: LexError) {
    match tokenize(input) {
        Err(CompilationError::Lex { source, .. }) => assert_eq!(source, expected),
        other => panic!("expected a lexing error for {input:?}, got {other:?}"),
    }
}

#[test]
fn operators_and_numbers() {
    let tokens = tokenize("+-123 9.8654*/").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::new(Plus, "+"),
            Token::new(Minus, "-"),
            Token::new(Number, "123"),
            Token::new(Number, "9.8654"),
            Token::new(Asterisk, "*"),
            Token::new(Slash, "/"),
            Token::eof(),
        ]
    );
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("IF+-123 foo*THEN/"),
        vec![If, Plus, Minus, Number, Ident, Asterisk, Then, Slash, Eof]
    );
}

#[test]
fn comment_runs_to_end_of_line() {
    assert_eq!(
        kinds("+- # comment\n */"),
        vec![Plus, Minus, Newline, Asterisk, Slash, Eof]
    );
}

#[test]
fn comment_at_end_of_input() {
    assert_eq!(kinds("LET # no newline after this"), vec![Let, Eof]);
}

#[test]
fn single_and_double_character_operators() {
    assert_eq!(kinds("="), vec![Eq, Eof]);
    assert_eq!(kinds("=="), vec![EqEq, Eof]);
    assert_eq!(
        kinds("< <= > >= != = =="),
        vec![Lt, LtEq, Gt, GtEq, NotEq, Eq, EqEq, Eof]
    );
    assert_eq!(kinds("a>=b"), vec![Ident, GtEq, Ident, Eof]);
}

#[test]
fn comparison_operator_text_is_kept() {
    let texts: Vec<String> = tokenize("<= != ==")
        .unwrap()
        .into_iter()
        .map(|token| token.text)
        .collect();
    assert_eq!(texts, vec!["<=", "!=", "==", ""]);
}

#[test]
fn strings_drop_their_quotes() {
    let tokens = tokenize("PRINT \"hello, world!\"\n").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::new(Print, "PRINT"),
            Token::new(TokenKind::String, "hello, world!"),
            Token::new(Newline, "\n"),
            Token::eof(),
        ]
    );
}

#[test]
fn empty_string() {
    let tokens = tokenize("\"\"").unwrap();
    assert_eq!(tokens[0], Token::new(TokenKind::String, ""));
}

#[test]
fn every_keyword_is_recognized() {
    for (text, kind) in KEYWORDS.entries() {
        assert!(kind.is_keyword());
        assert_eq!(kinds(text), vec![*kind, Eof], "keyword {text}");
    }
    assert_eq!(KEYWORDS.len(), 11);
}

#[test]
fn keywords_are_case_sensitive_and_whole_words() {
    assert_eq!(kinds("print"), vec![Ident, Eof]);
    assert_eq!(kinds("LETTER"), vec![Ident, Eof]);
    assert_eq!(kinds("ENDIF ENDWHILE"), vec![EndIf, EndWhile, Eof]);
}

#[test]
fn identifiers_are_letters_only() {
    let tokens = tokenize("abc1").unwrap();
    assert_eq!(tokens[0], Token::new(Ident, "abc"));
    assert_eq!(tokens[1], Token::new(Number, "1"));
}

#[test]
fn whitespace_is_skipped_but_newlines_are_tokens() {
    assert_eq!(
        kinds(" \t LET\r\n\n x "),
        vec![Let, Newline, Newline, Ident, Eof]
    );
}

#[test]
fn eof_repeats() {
    let mut lexer = Lexer::new("");
    assert!(lexer.next_token().unwrap().is_eof());
    assert!(lexer.next_token().unwrap().is_eof());
}

#[test]
fn lone_bang_is_an_error() {
    assert_lex_error("a ! b", LexError::BareBang);
    assert_lex_error("!", LexError::BareBang);
}

#[test]
fn number_needs_digits_after_the_point() {
    assert_lex_error("1.", LexError::MalformedNumber);
    assert_lex_error("12.x", LexError::MalformedNumber);
    assert_lex_error(".5", LexError::UnknownCharacter);
}

#[test]
fn strings_reject_format_breaking_characters() {
    for input in [
        "\"50%\"",
        "\"a\\nb\"",
        "\"tab\there\"",
        "\"line\nbreak\"",
        "\"carriage\rreturn\"",
        "\"unterminated",
    ] {
        assert_lex_error(input, LexError::IllegalStringChar);
    }
}

#[test]
fn unknown_characters_are_errors() {
    for input in ["@", "LET a_b = 1", "(1)", ";"] {
        assert_lex_error(input, LexError::UnknownCharacter);
    }
}

#[test]
fn lex_error_names_the_offending_text() {
    let err = tokenize("LET x = 3 ! 4").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Lexing error: expected `!=`, got a lone `!` at \"! \""
    );
}

#[test]
fn kind_names() {
    assert_eq!(EqEq.to_string(), "EQEQ");
    assert_eq!(EndWhile.name(), "ENDWHILE");
    assert_eq!(Eof.name(), "EOF");
    assert!(GtEq.is_comparison());
    assert!(!Eq.is_comparison());
    assert!(If.is_keyword());
    assert!(!Ident.is_keyword());
}
