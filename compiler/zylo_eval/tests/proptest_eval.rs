//! Property-based tests for operator semantics.
//!
//! Integer arithmetic must agree with Rust's checked arithmetic: a result
//! whenever Rust produces one, an error whenever Rust overflows or divides by
//! zero. Evaluating through source text and through the operator entry point
//! must agree.

use proptest::prelude::*;
use zylo_eval::{buffer_handler, evaluate_binary, values_equal, EvalErrorKind, Interpreter, Value};
use zylo_ir::BinaryOp;

fn checked(op: BinaryOp, a: i64, b: i64) -> Option<i64> {
    match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mul => a.checked_mul(b),
        BinaryOp::Div => a.checked_div(b),
        BinaryOp::Mod => a.checked_rem(b),
        _ => None,
    }
}

fn arb_op() -> impl Strategy<Value = BinaryOp> {
    prop::sample::select(vec![
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
    ])
}

fn arb_int() -> impl Strategy<Value = i64> {
    prop_oneof![
        -1000i64..1000,
        any::<i64>(),
        Just(0),
        Just(-1),
        Just(i64::MIN),
        Just(i64::MAX),
    ]
}

proptest! {
    #[test]
    fn integer_arithmetic_matches_checked(op in arb_op(), a in arb_int(), b in arb_int()) {
        let result = evaluate_binary(op, &Value::Int(a), &Value::Int(b));
        match (checked(op, a, b), result) {
            (Some(expected), Ok(Value::Int(got))) => prop_assert_eq!(expected, got),
            (None, Err(err)) => {
                let zero = matches!(
                    err.kind,
                    EvalErrorKind::DivisionByZero | EvalErrorKind::ModuloByZero
                );
                let overflow = matches!(err.kind, EvalErrorKind::IntegerOverflow { .. });
                prop_assert!(if b == 0 { zero } else { overflow }, "{}", err);
            }
            (expected, got) => prop_assert!(false, "expected {:?}, got {:?}", expected, got),
        }
    }

    #[test]
    fn source_arithmetic_matches_operator(op in arb_op(), a in -1000i64..1000, b in 1i64..1000) {
        let source = format!("({a}) {} ({b})", op.as_symbol());
        let parsed = zylo_parse::parse_source(&source);
        prop_assert!(!parsed.has_errors());
        let mut interpreter = Interpreter::builder().print_handler(buffer_handler()).build();
        let from_source = interpreter.run(&parsed.program).map_err(|err| err.to_string());
        let direct = evaluate_binary(op, &Value::Int(a), &Value::Int(b)).map_err(|err| err.to_string());
        match (from_source, direct) {
            (Ok(x), Ok(y)) => prop_assert!(values_equal(&x, &y), "{} vs {}", x, y),
            (x, y) => prop_assert!(false, "{:?} vs {:?}", x, y),
        }
    }

    #[test]
    fn comparison_is_consistent(a in any::<i64>(), b in any::<i64>()) {
        let lt = evaluate_binary(BinaryOp::Lt, &Value::Int(a), &Value::Int(b));
        let ge = evaluate_binary(BinaryOp::GtEq, &Value::Int(a), &Value::Int(b));
        prop_assert!(matches!((lt, ge), (Ok(Value::Bool(x)), Ok(Value::Bool(y))) if x != y));
    }
}
