use std::collections::{BTreeSet, HashSet};
use std::mem;

use log::{debug, trace};

use crate::emitter::Emitter;
use crate::error::{CompilationError, CompileResult};
use crate::lexer::Lexer;
use crate::parse_error;
use crate::token::{Token, TokenKind};

/// Recursive-descent parser that writes C as it recognizes each construct.
///
/// There is no syntax tree: every grammar rule appends its translation to the
/// [`Emitter`] directly. The first violation aborts the whole compilation.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    emitter: Emitter,
    cur: Token,
    peek: Token,

    /// Variables assigned so far through `LET` or `INPUT`.
    symbols: HashSet<String>,
    labels_declared: HashSet<String>,
    /// Resolved only once the whole program has been seen, so jumping
    /// forward is allowed.
    labels_gotoed: BTreeSet<String>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> CompileResult<Self> {
        let mut lexer = Lexer::new(source);
        let cur = lexer.next_token()?;
        let peek = lexer.next_token()?;

        Ok(Self {
            lexer,
            emitter: Emitter::new(),
            cur,
            peek,
            symbols: HashSet::new(),
            labels_declared: HashSet::new(),
            labels_gotoed: BTreeSet::new(),
        })
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.cur.kind == kind
    }

    fn advance(&mut self) -> CompileResult<()> {
        let next = self.lexer.next_token()?;
        self.cur = mem::replace(&mut self.peek, next);
        Ok(())
    }

    /// Consumes the current token if it is of the given kind.
    fn expect(&mut self, kind: TokenKind) -> CompileResult<Token> {
        if !self.check(kind) {
            return Err(parse_error!(
                "expected {kind}, got {} ({:?})",
                self.cur.kind,
                self.cur.text
            ));
        }
        let token = self.cur.clone();
        self.advance()?;
        Ok(token)
    }

    /// program ::= {statement}
    pub fn program(mut self) -> CompileResult<String> {
        self.emitter.header_line("#include <stdio.h>");
        self.emitter.header_line("int main(void){");

        // the grammar requires newlines between statements, not before them
        while self.check(TokenKind::Newline) {
            self.advance()?;
        }

        while !self.check(TokenKind::Eof) {
            self.statement()?;
        }

        self.emitter.emit_line("return 0;");
        self.emitter.emit_line("}");

        if let Some(label) = self
            .labels_gotoed
            .iter()
            .find(|label| !self.labels_declared.contains(*label))
        {
            return Err(CompilationError::UndeclaredLabel(label.clone()));
        }

        Ok(self.emitter.finalize())
    }

    fn statement(&mut self) -> CompileResult<()> {
        debug!("statement: {} {:?}", self.cur.kind, self.cur.text);

        match self.cur.kind {
            TokenKind::Print => self.print_stmt()?,
            TokenKind::If => self.if_stmt()?,
            TokenKind::While => self.while_stmt()?,
            TokenKind::Label => self.label_stmt()?,
            TokenKind::Goto => self.goto_stmt()?,
            TokenKind::Let => self.let_stmt()?,
            TokenKind::Input => self.input_stmt()?,
            other => {
                return Err(parse_error!(
                    "invalid statement at {:?} ({other})",
                    self.cur.text
                ));
            }
        }

        self.nl()
    }

    /// "PRINT" (expression | string)
    fn print_stmt(&mut self) -> CompileResult<()> {
        self.advance()?;

        if self.check(TokenKind::String) {
            self.emitter
                .emit_line(format!("printf(\"{}\\n\");", self.cur.text));
            self.advance()
        } else {
            self.emitter.emit("printf(\"%.2f\\n\", (float)(");
            self.expression()?;
            self.emitter.emit_line("));");
            Ok(())
        }
    }

    /// "IF" comparison "THEN" nl {statement} "ENDIF"
    fn if_stmt(&mut self) -> CompileResult<()> {
        self.advance()?;
        self.emitter.emit("if(");
        self.comparison()?;

        self.expect(TokenKind::Then)?;
        self.nl()?;
        self.emitter.emit_line("){");

        while !self.check(TokenKind::EndIf) {
            self.statement()?;
        }

        self.expect(TokenKind::EndIf)?;
        self.emitter.emit_line("}");
        Ok(())
    }

    /// "WHILE" comparison "REPEAT" nl {statement} "ENDWHILE"
    fn while_stmt(&mut self) -> CompileResult<()> {
        self.advance()?;
        self.emitter.emit("while(");
        self.comparison()?;

        self.expect(TokenKind::Repeat)?;
        self.nl()?;
        self.emitter.emit_line("){");

        while !self.check(TokenKind::EndWhile) {
            self.statement()?;
        }

        self.expect(TokenKind::EndWhile)?;
        self.emitter.emit_line("}");
        Ok(())
    }

    /// "LABEL" ident
    fn label_stmt(&mut self) -> CompileResult<()> {
        self.advance()?;
        let name = self.expect(TokenKind::Ident)?.text;

        if !self.labels_declared.insert(name.clone()) {
            return Err(CompilationError::DuplicateLabel(name));
        }

        self.emitter.emit_line(format!("{name}:"));
        Ok(())
    }

    /// "GOTO" ident
    fn goto_stmt(&mut self) -> CompileResult<()> {
        self.advance()?;
        let name = self.expect(TokenKind::Ident)?.text;

        self.emitter.emit_line(format!("goto {name};"));
        self.labels_gotoed.insert(name);
        Ok(())
    }

    /// "LET" ident "=" expression
    fn let_stmt(&mut self) -> CompileResult<()> {
        self.advance()?;
        let name = self.expect(TokenKind::Ident)?.text;
        self.declare(&name);

        self.emitter.emit(format!("{name} = "));
        self.expect(TokenKind::Eq)?;
        self.expression()?;
        self.emitter.emit_line(";");
        Ok(())
    }

    /// "INPUT" ident
    fn input_stmt(&mut self) -> CompileResult<()> {
        self.advance()?;
        let name = self.expect(TokenKind::Ident)?.text;
        self.declare(&name);

        // On a failed read, zero the variable and drop the offending word so
        // later reads stay in sync.
        self.emitter
            .emit_line(format!("if(0 == scanf(\"%f\", &{name})) {{"));
        self.emitter.emit_line(format!("{name} = 0;"));
        self.emitter.emit_line("scanf(\"%*s\");");
        self.emitter.emit_line("}");
        Ok(())
    }

    /// Declares `name` as a float the first time it is assigned.
    fn declare(&mut self, name: &str) {
        if self.symbols.insert(name.to_string()) {
            self.emitter.header_line(format!("float {name};"));
        }
    }

    /// comparison ::= expression (("==" | "!=" | ">" | ">=" | "<" | "<=") expression)+
    fn comparison(&mut self) -> CompileResult<()> {
        self.expression()?;

        if !self.cur.kind.is_comparison() {
            return Err(parse_error!(
                "expected comparison operator at {:?} ({})",
                self.cur.text,
                self.cur.kind
            ));
        }

        while self.cur.kind.is_comparison() {
            self.emitter.emit(&self.cur.text);
            self.advance()?;
            self.expression()?;
        }
        Ok(())
    }

    /// expression ::= term {("-" | "+") term}
    fn expression(&mut self) -> CompileResult<()> {
        self.term()?;

        while self.check(TokenKind::Plus) || self.check(TokenKind::Minus) {
            self.emitter.emit(&self.cur.text);
            self.advance()?;
            self.term()?;
        }
        Ok(())
    }

    /// term ::= unary {("/" | "*") unary}
    fn term(&mut self) -> CompileResult<()> {
        self.unary()?;

        while self.check(TokenKind::Asterisk) || self.check(TokenKind::Slash) {
            self.emitter.emit(&self.cur.text);
            // keep C from truncating when both operands are integer literals
            if self.check(TokenKind::Slash) {
                self.emitter.emit("(float)");
            }
            self.advance()?;
            self.unary()?;
        }
        Ok(())
    }

    /// unary ::= ["+" | "-"] primary
    fn unary(&mut self) -> CompileResult<()> {
        if self.check(TokenKind::Plus) || self.check(TokenKind::Minus) {
            self.emitter.emit(&self.cur.text);
            self.advance()?;
        }
        self.primary()
    }

    /// primary ::= number | ident
    fn primary(&mut self) -> CompileResult<()> {
        trace!("primary: {} {:?}", self.cur.kind, self.cur.text);

        match self.cur.kind {
            TokenKind::Number => {
                self.emitter.emit(c_number(&self.cur.text));
                return self.advance();
            }
            TokenKind::Ident => {
                if !self.symbols.contains(&self.cur.text) {
                    return Err(CompilationError::UndeclaredVariable(self.cur.text.clone()));
                }
            }
            other => {
                return Err(parse_error!(
                    "unexpected token at {:?} ({other})",
                    self.cur.text
                ));
            }
        }

        self.emitter.emit(&self.cur.text);
        self.advance()
    }

    /// Every statement ends with one or more newlines. The end of input
    /// counts as the line break after the last statement.
    fn nl(&mut self) -> CompileResult<()> {
        if self.check(TokenKind::Eof) {
            return Ok(());
        }

        self.expect(TokenKind::Newline)?;
        while self.check(TokenKind::Newline) {
            self.advance()?;
        }
        Ok(())
    }
}

/// Drops leading zeros from a number literal so C does not read it as octal.
/// At least one digit is kept before the point.
fn c_number(text: &str) -> &str {
    let trimmed = text.trim_start_matches('0');
    if trimmed.is_empty() || trimmed.starts_with('.') {
        &text[text.len() - trimmed.len() - 1..]
    } else {
        trimmed
    }
}
