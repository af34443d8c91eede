//! Token types and the pull interface the parser consumes.

use std::fmt;

use crate::Span;

/// Token kinds.
///
/// Literal payloads live on [`Token::literal`] so the kind stays `Copy` and
/// can be compared cheaply by the parser.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Semicolon,
    Colon,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    BangEq,
    Eq,
    EqEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    /// `&&` or `and`
    And,
    /// `||` or `or`
    Or,
    /// `=>`
    Arrow,

    // Literals
    Ident,
    Number,
    String,

    // Keywords
    Class,
    Else,
    Elif,
    False,
    For,
    Func,
    If,
    Nil,
    Return,
    Super,
    This,
    True,
    Var,
    Const,
    While,
    Break,
    Continue,
    Import,
    From,
    Try,
    Catch,
    Throw,
    Finally,
    Async,
    Await,
    Spawn,
    In,

    // Control
    Newline,
    /// Unrecognized input; the lexer never fails, it emits this instead.
    Error,
    Eof,
}

impl TokenKind {
    /// Human-readable name used in "expected X, got Y" diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Bang => "'!'",
            TokenKind::BangEq => "'!='",
            TokenKind::Eq => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::Lt => "'<'",
            TokenKind::LtEq => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::GtEq => "'>='",
            TokenKind::And => "'&&'",
            TokenKind::Or => "'||'",
            TokenKind::Arrow => "'=>'",
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Class => "'class'",
            TokenKind::Else => "'else'",
            TokenKind::Elif => "'elif'",
            TokenKind::False => "'false'",
            TokenKind::For => "'for'",
            TokenKind::Func => "'func'",
            TokenKind::If => "'if'",
            TokenKind::Nil => "'nil'",
            TokenKind::Return => "'return'",
            TokenKind::Super => "'super'",
            TokenKind::This => "'this'",
            TokenKind::True => "'true'",
            TokenKind::Var => "'var'",
            TokenKind::Const => "'const'",
            TokenKind::While => "'while'",
            TokenKind::Break => "'break'",
            TokenKind::Continue => "'continue'",
            TokenKind::Import => "'import'",
            TokenKind::From => "'from'",
            TokenKind::Try => "'try'",
            TokenKind::Catch => "'catch'",
            TokenKind::Throw => "'throw'",
            TokenKind::Finally => "'finally'",
            TokenKind::Async => "'async'",
            TokenKind::Await => "'await'",
            TokenKind::Spawn => "'spawn'",
            TokenKind::In => "'in'",
            TokenKind::Newline => "newline",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of file",
        }
    }

    /// Keyword lookup for an identifier-shaped word.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "class" => TokenKind::Class,
            "else" => TokenKind::Else,
            "elif" => TokenKind::Elif,
            "false" => TokenKind::False,
            "for" => TokenKind::For,
            "func" => TokenKind::Func,
            "if" => TokenKind::If,
            "nil" => TokenKind::Nil,
            "return" => TokenKind::Return,
            "super" => TokenKind::Super,
            "this" => TokenKind::This,
            "true" => TokenKind::True,
            "var" => TokenKind::Var,
            "const" => TokenKind::Const,
            "while" => TokenKind::While,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "import" => TokenKind::Import,
            "from" => TokenKind::From,
            "try" => TokenKind::Try,
            "catch" => TokenKind::Catch,
            "throw" => TokenKind::Throw,
            "finally" => TokenKind::Finally,
            "async" => TokenKind::Async,
            "await" => TokenKind::Await,
            "spawn" => TokenKind::Spawn,
            "in" => TokenKind::In,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Parsed value of a literal token.
#[derive(Clone, PartialEq, Debug)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
}

/// A lexical unit with its source text and location.
#[derive(Clone, PartialEq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token (the unescaped value lives in `literal`).
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            span,
        }
    }

    #[must_use]
    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    pub fn eof(span: Span) -> Self {
        Token::new(TokenKind::Eof, "", span)
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} '{}'", self.span, self.kind, self.lexeme.escape_debug())
    }
}

/// Pull interface over a token stream.
///
/// Implementations must keep returning an `Eof` token once the stream is
/// exhausted; the parser relies on that to terminate.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }
}

/// An eagerly collected token stream, always terminated by `Eof`.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    /// Build from arbitrary tokens, appending `Eof` if missing.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut list = TokenList { tokens };
        list.finish();
        list
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Append the terminating `Eof` unless one is already last.
    pub fn finish(&mut self) {
        if self.tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            return;
        }
        let span = self
            .tokens
            .last()
            .map_or(Span::point(1, 1), |t| Span::point(t.span.end_line, t.span.end_col));
        self.tokens.push(Token::eof(span));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Kinds only, handy for assertions.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }

    /// Cursor that replays this list through [`TokenSource`].
    pub fn cursor(&self) -> TokenCursor<'_> {
        TokenCursor {
            tokens: &self.tokens,
            pos: 0,
        }
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Replays a [`TokenList`] as a [`TokenSource`].
#[derive(Clone, Debug)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl TokenSource for TokenCursor<'_> {
    fn next_token(&mut self) -> Token {
        match self.tokens.get(self.pos) {
            Some(token) => {
                self.pos += 1;
                token.clone()
            }
            None => {
                let span = self
                    .tokens
                    .last()
                    .map_or(Span::point(1, 1), |t| Span::point(t.span.end_line, t.span.end_col));
                Token::eof(span)
            }
        }
    }
}
