//! Property-based tests for the parser.
//!
//! Arbitrary token sequences and arbitrary source text must always parse to
//! completion, with a bounded and reproducible set of diagnostics.

use proptest::prelude::*;
use zylo_ir::{Literal, Span, Token, TokenKind, TokenList};
use zylo_parse::{parse, parse_source, parse_with, ParseOptions};

const KINDS: &[TokenKind] = &[
    TokenKind::LParen,
    TokenKind::RParen,
    TokenKind::LBrace,
    TokenKind::RBrace,
    TokenKind::LBracket,
    TokenKind::RBracket,
    TokenKind::Comma,
    TokenKind::Dot,
    TokenKind::Semicolon,
    TokenKind::Colon,
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Star,
    TokenKind::Bang,
    TokenKind::Eq,
    TokenKind::EqEq,
    TokenKind::Lt,
    TokenKind::And,
    TokenKind::Or,
    TokenKind::Ident,
    TokenKind::Number,
    TokenKind::String,
    TokenKind::Var,
    TokenKind::Func,
    TokenKind::Class,
    TokenKind::If,
    TokenKind::Elif,
    TokenKind::Else,
    TokenKind::While,
    TokenKind::For,
    TokenKind::In,
    TokenKind::Return,
    TokenKind::Try,
    TokenKind::Catch,
    TokenKind::Finally,
    TokenKind::Throw,
    TokenKind::Break,
    TokenKind::Import,
    TokenKind::This,
    TokenKind::Nil,
    TokenKind::Newline,
    TokenKind::Error,
];

fn arb_tokens() -> impl Strategy<Value = TokenList> {
    prop::collection::vec(prop::sample::select(KINDS), 0..300).prop_map(|kinds| {
        let tokens = kinds
            .into_iter()
            .enumerate()
            .map(|(i, kind)| {
                let col = u32::try_from(i + 1).unwrap_or(u32::MAX);
                let span = Span::new(1, col, 1, col + 1);
                match kind {
                    TokenKind::Ident => Token::new(kind, "x", span),
                    TokenKind::Number => Token::new(kind, "7", span).with_literal(Literal::Int(7)),
                    TokenKind::String => {
                        Token::new(kind, "\"s\"", span).with_literal(Literal::Str("s".into()))
                    }
                    TokenKind::Error => Token::new(kind, "@", span),
                    _ => Token::new(kind, "", span),
                }
            })
            .collect();
        TokenList::from_tokens(tokens)
    })
}

/// Source fragments that are mostly grammatical.
fn arb_snippet() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("var a = 1"),
        Just("a = a + 2 * 3"),
        Just("if a < 3 {"),
        Just("} else {"),
        Just("}"),
        Just("func f(x) {"),
        Just("return x"),
        Just("while true {"),
        Just("break"),
        Just("show.log(a, [1, 2], {\"k\": 3})"),
        Just("class C { var n = 0"),
        Just("try { throw 1 } catch (e) {"),
        Just("for i in xs {"),
        Just("("),
        Just(")"),
    ];
    prop::collection::vec(piece, 0..40).prop_map(|pieces| pieces.join("\n"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn arbitrary_tokens_terminate_with_bounded_diagnostics(tokens in arb_tokens()) {
        let output = parse(tokens.cursor());
        prop_assert!(output.diagnostics.len() <= 100);
        prop_assert!(output.program.statements.len() <= tokens.len());
    }

    #[test]
    fn arbitrary_tokens_parse_deterministically(tokens in arb_tokens()) {
        let first = parse(tokens.cursor());
        let second = parse(tokens.cursor());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn tight_limits_still_terminate(tokens in arb_tokens(), limit in 1usize..5) {
        let options = ParseOptions::default()
            .with_max_statements(limit)
            .with_max_block_statements(limit)
            .with_max_infix_steps(limit)
            .with_max_depth(limit)
            .with_error_limit(limit);
        let output = parse_with(tokens.cursor(), &options);
        prop_assert!(output.diagnostics.len() <= limit);
        prop_assert!(output.program.statements.len() <= limit);
    }

    #[test]
    fn arbitrary_source_never_panics(source in "\\PC{0,300}") {
        let output = parse_source(&source);
        prop_assert!(output.diagnostics.len() <= 100);
    }

    #[test]
    fn snippets_render_and_reparse_consistently(source in arb_snippet()) {
        let first = parse_source(&source);
        let second = parse_source(&source);
        prop_assert_eq!(first.messages(), second.messages());
        let _ = first.program.to_string();
    }
}
