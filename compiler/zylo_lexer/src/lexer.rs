//! Logos-driven lexer.

use logos::Logos;
use zylo_ir::{Literal, Span, Token, TokenKind, TokenList, TokenSource};

use crate::escape::unescape;
use crate::LineIndex;

/// Raw token from logos, before spans and literals are attached.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")]
enum RawToken {
    // === Comments (skip) ===
    #[regex(r"//[^\n]*")]
    #[regex(r"#[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[token("\n")]
    Newline,

    // === Symbols ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,

    // === Operators ===
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("!=")]
    BangEq,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("=>")]
    Arrow,

    // === Literals ===
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    String,

    #[token("\"\"\"", triple_quoted)]
    TripleString(String),

    // Keywords are resolved from identifiers in `convert_token`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Consume a (possibly nested) `/* ... */` body after the opening `/*`.
///
/// Returns `false` for an unterminated comment, which logos turns into an
/// error covering the rest of the input.
fn block_comment(lex: &mut logos::Lexer<RawToken>) -> bool {
    let rest = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < rest.len() {
        if rest[i..].starts_with(b"/*") {
            depth += 1;
            i += 2;
        } else if rest[i..].starts_with(b"*/") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lex.bump(i);
                return true;
            }
        } else {
            i += 1;
        }
    }
    lex.bump(rest.len());
    false
}

/// Consume a `"""` string body up to and including the closing `"""`.
fn triple_quoted(lex: &mut logos::Lexer<RawToken>) -> Option<String> {
    let rest = lex.remainder();
    if let Some(end) = rest.find("\"\"\"") {
        let body = rest[..end].to_string();
        lex.bump(end + 3);
        Some(body)
    } else {
        lex.bump(rest.len());
        None
    }
}

/// Streaming lexer over a source string.
///
/// Implements [`TokenSource`]; after the input is exhausted every call
/// returns an `Eof` token positioned at the end of the source.
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, RawToken>,
    lines: LineIndex,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            inner: RawToken::lexer(source),
            lines: LineIndex::new(source),
        }
    }

    fn eof(&self) -> Token {
        let (line, col) = self.lines.position(self.source, self.source.len());
        Token::eof(Span::point(line, col))
    }
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> Token {
        while let Some(result) = self.inner.next() {
            let range = self.inner.span();
            let span = self.lines.span(self.source, range);
            let slice = self.inner.slice();

            match result {
                Ok(RawToken::LineComment | RawToken::BlockComment) => continue,
                Ok(raw) => return convert_token(raw, slice, span),
                Err(()) => return Token::new(TokenKind::Error, slice, span),
            }
        }
        self.eof()
    }
}

/// Lex source code into a [`TokenList`] terminated by `Eof`.
pub fn lex(source: &str) -> TokenList {
    let mut lexer = Lexer::new(source);
    let mut result = TokenList::new();
    loop {
        let token = lexer.next_token();
        let done = token.is(TokenKind::Eof);
        result.push(token);
        if done {
            return result;
        }
    }
}

fn convert_token(raw: RawToken, slice: &str, span: Span) -> Token {
    let kind = match raw {
        RawToken::Int(n) => {
            return Token::new(TokenKind::Number, slice, span).with_literal(Literal::Int(n));
        }
        RawToken::Float(x) => {
            return Token::new(TokenKind::Number, slice, span).with_literal(Literal::Float(x));
        }
        RawToken::String => {
            let body = &slice[1..slice.len() - 1];
            return Token::new(TokenKind::String, slice, span)
                .with_literal(Literal::Str(unescape(body)));
        }
        RawToken::TripleString(body) => {
            return Token::new(TokenKind::String, slice, span).with_literal(Literal::Str(body));
        }
        RawToken::Ident => TokenKind::keyword(slice).unwrap_or(TokenKind::Ident),

        RawToken::Newline => TokenKind::Newline,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Bang => TokenKind::Bang,
        RawToken::BangEq => TokenKind::BangEq,
        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::AmpAmp => TokenKind::And,
        RawToken::PipePipe => TokenKind::Or,
        RawToken::Arrow => TokenKind::Arrow,

        // Filtered out by the caller
        RawToken::LineComment | RawToken::BlockComment => TokenKind::Error,
    };
    Token::new(kind, slice, span)
}
