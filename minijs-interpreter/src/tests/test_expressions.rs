use crate::{run_source, InterpreterSession, Value};
use pretty_assertions::assert_eq;

fn printed(source: &str) -> Vec<String> {
    run_source(source).unwrap()
}

#[test]
fn test_declaration_then_log_prints_sum() {
    assert_eq!(printed("let x = 1 + 2;\nconsole.log(x);"), vec!["3"]);
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(
        printed("console.log(1 + 2 * 3, (1 + 2) * 3, 10 - 4 - 3, 8 / 4 / 2);"),
        vec!["7 9 3 1"]
    );
}

#[test]
fn test_unary_operators() {
    assert_eq!(
        printed("console.log(-5 + 2, !true, !0, !\"\", -(-4));"),
        vec!["-3 false true true 4"]
    );
}

#[test]
fn test_plus_concatenates_when_either_side_is_string() {
    assert_eq!(
        printed("console.log(\"a\" + 1 + 2, 1 + 2 + \"a\", \"n=\" + 0.5, \"\" + true);"),
        vec!["a12 3a n=0.5 true"]
    );
}

#[test]
fn test_comparisons() {
    assert_eq!(
        printed("console.log(2 > 1, \"b\" < \"a\", 3 >= 3, 1 == 1, \"1\" == 1, 2 != 3, 1 <= 0);"),
        vec!["true false true true false true false"]
    );
}

#[test]
fn test_logical_operators_return_an_operand() {
    let source = "function crash() { throw \"should not run\"; }\n\
                  console.log(0 || \"fallback\", 1 && \"second\", false && crash(), \"x\" || crash());";
    assert_eq!(printed(source), vec!["fallback second false x"]);
}

#[test]
fn test_logical_operators_yield_right_operand_when_evaluated() {
    let source = "let a = [1];\nconsole.log(\"\" || 0, 1 && a, true && \"\", false || a.length);";
    assert_eq!(printed(source), vec!["0 [1]  1"]);
}

#[test]
fn test_ternary_is_right_associative() {
    let source = "let n = 5;\nconsole.log(n > 3 ? \"big\" : \"small\", n > 10 ? 1 : n > 4 ? 2 : 3);";
    assert_eq!(printed(source), vec!["big 2"]);
}

#[test]
fn test_number_display() {
    assert_eq!(
        printed("console.log(0.1 + 0.2, 7 / 2, 1 / 3, 2 * 1000000);"),
        vec!["0.30000000000000004 3.5 0.3333333333333333 2000000"]
    );
}

#[test]
fn test_console_log_without_arguments_prints_empty_line() {
    assert_eq!(printed("console.log();"), vec![""]);
}

#[test]
fn test_final_expression_is_the_completion_value() {
    let mut session = InterpreterSession::captured();
    session
        .assert_evaluates_to("let x = 2;\nx * 3;", Value::Number(6.0))
        .unwrap();
    session
        .assert_evaluates_to("x = 1;", Value::Undefined)
        .unwrap();
}
