//! Property-based tests for the lexer.

use proptest::prelude::*;
use zylo_ir::{Literal, TokenKind};
use zylo_lexer::lex;

/// Fragments that mix valid tokens with common malformed input.
fn arb_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_][a-z0-9_]{0,8}",
        "[0-9]{1,6}",
        "[0-9]{1,3}\\.[0-9]{1,3}",
        "\"[a-z ]{0,8}\"",
        Just("/* c */".to_string()),
        Just("/*".to_string()),
        Just("\"\"\"".to_string()),
        Just("\n".to_string()),
        Just("// note".to_string()),
        "[-+*/%=<>!&|(){}\\[\\],.;:#@$]",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn lexing_arbitrary_text_never_panics(source in "\\PC{0,200}") {
        let tokens = lex(&source);
        prop_assert_eq!(tokens.as_slice().last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn spans_are_monotonic(parts in prop::collection::vec(arb_fragment(), 0..40)) {
        let source = parts.join(" ");
        let tokens = lex(&source);
        for pair in tokens.as_slice().windows(2) {
            prop_assert!(pair[0].span.start() <= pair[0].span.end());
            prop_assert!(pair[0].span.end() <= pair[1].span.start());
        }
    }

    #[test]
    fn integer_literals_round_trip(n in 0i64..i64::MAX) {
        let tokens = lex(&n.to_string());
        prop_assert_eq!(tokens.as_slice()[0].literal.clone(), Some(Literal::Int(n)));
    }
}
