//! End-to-end programs: source text through the parser and interpreter, with
//! output captured in a buffer.

use pretty_assertions::assert_eq;
use zylo_eval::{
    buffer_handler, scripted_input, EvalError, EvalErrorKind, Interpreter, Value,
};

struct Outcome {
    result: Result<Value, EvalError>,
    output: String,
}

fn execute(source: &str, input: &[&str]) -> Outcome {
    let parsed = zylo_parse::parse_source(source);
    assert!(!parsed.has_errors(), "{:?}", parsed.messages());
    let output = buffer_handler();
    let mut interpreter = Interpreter::builder()
        .print_handler(output.clone())
        .input(scripted_input(input.iter().copied()))
        .build();
    let result = interpreter.run(&parsed.program);
    Outcome {
        result,
        output: output.get_output(),
    }
}

fn output_of(source: &str) -> String {
    let outcome = execute(source, &[]);
    if let Err(err) = outcome.result {
        panic!("program failed: {err}");
    }
    outcome.output
}

fn error_of(source: &str) -> EvalError {
    match execute(source, &[]).result {
        Ok(value) => panic!("expected an error, got {value:?}"),
        Err(err) => err,
    }
}

#[test]
fn test_product_binds_tighter_than_sum() {
    assert!(matches!(execute("1 + 2 * 3", &[]).result, Ok(Value::Int(7))));
}

#[test]
fn test_string_plus_integer_concatenates() {
    let Ok(Value::Str(s)) = execute("\"a\" + 1", &[]).result else {
        panic!("expected a string");
    };
    assert_eq!(&*s, "a1");
}

#[test]
fn test_division_by_zero_is_an_error() {
    for source in ["5 / 0", "5.0 / 0.0", "5 % 0"] {
        let err = error_of(source);
        assert!(
            matches!(
                err.kind,
                EvalErrorKind::DivisionByZero | EvalErrorKind::ModuloByZero
            ),
            "{source}: {err}"
        );
    }
}

#[test]
fn test_closures_from_separate_calls_do_not_alias() {
    let source = "\
func make_counter() {
    var count = 0
    func next() {
        count = count + 1
        return count
    }
    return next
}
var a = make_counter()
var b = make_counter()
a()
a()
show.log(a(), b())
";
    assert_eq!(output_of(source), "3 1\n");
}

#[test]
fn test_while_assignment_visible_after_loop() {
    let source = "\
var total = 0
var i = 0
while i < 4 {
    total = total + i
    i = i + 1
}
show.log(total, i)
";
    assert_eq!(output_of(source), "6 4\n");
}

#[test]
fn test_break_inside_if_ends_the_loop() {
    let source = "\
var i = 0
while true {
    i = i + 1
    if i == 3 {
        break
    }
}
show.log(i)
";
    assert_eq!(output_of(source), "3\n");
}

#[test]
fn test_list_defaults_are_per_instance() {
    let source = "\
class Bag {
    var items = []
    var tags = {\"k\": [1]}
}
var first = Bag()
var second = Bag()
first.items.Append(1)
first.tags[\"k\"].Append(2)
show.log(first.items, second.items)
show.log(first.tags, second.tags)
";
    assert_eq!(output_of(source), "[1] []\n{k: [1, 2]} {k: [1]}\n");
}

#[test]
fn test_cyclic_class_default_is_copied() {
    let source = "\
func cyclic() {
    var xs = [1]
    xs.Append(xs)
    return xs
}
class Holder {
    var items = cyclic()
}
var first = Holder()
var second = Holder()
first.items.Append(2)
show.log(first.items, second.items)
show.log(len(second.items.Get(1)))
";
    assert_eq!(output_of(source), "[1, [...], 2] [1, [...]]\n2\n");
}

#[test]
fn test_repeated_self_reference_displays() {
    let source = "\
var xs = [1]
xs.Append(xs)
xs.Append(xs)
var s = string(xs)
show.log(s, \"\" + xs)
show.log(xs)
";
    assert_eq!(
        output_of(source),
        "[1, [...], [...]] [1, [...], [...]]\n[1, [...], [...]]\n"
    );
}

#[test]
fn test_early_return_from_nested_if() {
    let source = "\
func classify(n) {
    if n > 10 {
        if n > 100 {
            return \"huge\"
        }
        return \"big\"
    }
    return \"small\"
}
show.log(classify(500), classify(50), classify(5))
";
    assert_eq!(output_of(source), "huge big small\n");
}

#[test]
fn test_try_catch_finally() {
    let source = "\
func risky(n) {
    if n < 0 {
        throw \"negative\"
    }
    return n * 2
}
func safe(n) {
    try {
        return risky(n)
    } catch (e) {
        show.log(\"caught\", e)
        return 0
    } finally {
        show.log(\"done\", n)
    }
}
show.log(safe(4))
show.log(safe(-1))
";
    assert_eq!(
        output_of(source),
        "done 4\n8\ncaught negative\ndone -1\n0\n"
    );
}

#[test]
fn test_uncaught_throw_is_terminal() {
    let outcome = execute("show.log(\"before\")\nthrow {\"code\": 2}\nshow.log(\"after\")", &[]);
    assert_eq!(outcome.output, "before\n");
    let Err(err) = outcome.result else {
        panic!("throw should abort the run");
    };
    assert_eq!(err.to_string(), "uncaught exception: {code: 2}");
}

#[test]
fn test_runtime_module_import() {
    let source = "\
import zyloruntime
var words = zyloruntime.Split(\"to be or not\", \" \")
show.log(len(words), words.Get(3))
";
    assert_eq!(output_of(source), "4 not\n");
    assert_eq!(error_of("zyloruntime.Split(\"a\", \" \")").to_string(), "undefined variable: zyloruntime");
}

#[test]
fn test_collections_and_indexing() {
    let source = "\
var xs = [1, 2, 3]
xs[0] = 10
var h = {\"a\": 1}
h[\"b\"] = xs[0] + h[\"a\"]
show.log(xs, h, \"hey\"[1])
";
    assert_eq!(output_of(source), "[10, 2, 3] {a: 1, b: 11} e\n");
}

#[test]
fn test_index_errors() {
    assert_eq!(
        error_of("[1, 2][5]").to_string(),
        "index 5 out of bounds for length 2"
    );
    assert_eq!(error_of("{\"a\": 1}[\"b\"]").to_string(), "key not found: b");
    assert!(matches!(
        error_of("{\"a\": 1}[0]").kind,
        EvalErrorKind::HashKeyNotString { .. }
    ));
    assert!(matches!(
        error_of("5[0]").kind,
        EvalErrorKind::InvalidIndex { .. }
    ));
}

#[test]
fn test_interactive_program() {
    let source = "\
func main() {
    var name = read.line()
    var age = read.int()
    show.log(\"hello\", name, age + 1)
}
";
    let outcome = execute(source, &["Ada", "x", "36"]);
    assert!(outcome.result.is_ok());
    assert_eq!(
        outcome.output,
        "> > invalid number, please try again\n> hello Ada 37\n"
    );
}

#[test]
fn test_interpreters_are_isolated() {
    let parsed = zylo_parse::parse_source("var shared = 1");
    let mut first = Interpreter::builder().print_handler(buffer_handler()).build();
    let second = Interpreter::builder().print_handler(buffer_handler()).build();
    assert!(first.run(&parsed.program).is_ok());
    assert!(first.lookup("shared").is_some());
    assert!(second.lookup("shared").is_none());
}

#[test]
fn test_logical_operators_yield_booleans() {
    assert_eq!(
        output_of("show.log(1 && \"x\", null || 0, !\"\", 1 < 2 && 3 < 4)"),
        "true false true true\n"
    );
}
