use crate::{run_source, InterpreterSession, PipelineError, RuntimeErrorKind};
use pretty_assertions::assert_eq;

fn printed(source: &str) -> Vec<String> {
    run_source(source).unwrap()
}

fn runtime_kind(source: &str) -> RuntimeErrorKind {
    match run_source(source) {
        Err(PipelineError::Runtime(err)) => err.kind,
        other => panic!("Expected runtime error, got {:?}", other),
    }
}

#[test]
fn test_break_exits_only_innermost_loop() {
    let source = r#"
let log = [];
let i = 0;
while (i < 3) {
  let j = 0;
  while (true) {
    if (j == 2) { break; }
    j = j + 1;
  }
  log.push(i * 10 + j);
  i = i + 1;
}
console.log(log);
"#;
    assert_eq!(printed(source), vec!["[2, 12, 22]"]);
}

#[test]
fn test_break_in_nested_for_loops() {
    let source = r#"
let count = 0;
for (let a = 0; a < 3; a = a + 1) {
  for (let b = 0; b < 10; b = b + 1) {
    if (b == 1) { break; }
    count = count + 1;
  }
}
console.log(count);
"#;
    assert_eq!(printed(source), vec!["3"]);
}

#[test]
fn test_for_without_header_parts() {
    let source = "let n = 0;\nfor (;;) { n = n + 1; if (n == 4) { break; } }\nconsole.log(n);";
    assert_eq!(printed(source), vec!["4"]);
}

#[test]
fn test_while_with_false_condition_never_runs() {
    assert_eq!(
        printed("while (false) { console.log(\"never\"); }\nconsole.log(\"after\");"),
        vec!["after"]
    );
}

#[test]
fn test_switch_runs_only_first_matching_case() {
    let source = r#"
let x = 2;
switch (x) {
  case 2: console.log("first");
  case 2: console.log("second");
  default: console.log("default");
}
"#;
    assert_eq!(printed(source), vec!["first"]);
}

#[test]
fn test_switch_default_and_no_match() {
    let source = r#"
let v = "z";
switch (v) { case "a": console.log("a"); default: console.log("fallback"); }
switch (v) { case "b": console.log("b"); }
"#;
    assert_eq!(printed(source), vec!["fallback"]);
}

#[test]
fn test_break_in_switch_ends_enclosing_loop() {
    let source = r#"
for (let k = 0; k < 3; k = k + 1) {
  switch (k) { case 1: break; }
  console.log(k);
}
"#;
    assert_eq!(printed(source), vec!["0"]);
}

#[test]
fn test_break_in_default_ends_enclosing_while() {
    let source = r#"
let i = 0;
while (true) {
  switch (i) {
    case 0: console.log("zero");
    default: console.log("stop"); break;
  }
  i = i + 1;
}
console.log(i);
"#;
    assert_eq!(printed(source), vec!["zero", "stop", "1"]);
}

#[test]
fn test_break_in_top_level_switch_is_fatal() {
    let source = r#"
let x = 1;
switch (x) { case 1: console.log("one"); break; }
"#;
    assert_eq!(runtime_kind(source), RuntimeErrorKind::BreakOutsideLoop);

    let mut session = InterpreterSession::captured();
    assert!(session.evaluate(source).is_err());
    assert_eq!(session.output(), ["one"]);
}

#[test]
fn test_else_if_chain() {
    let source = r#"
function classify(n) {
  if (n < 0) { return "negative"; } else if (n == 0) { return "zero"; } else { return "positive"; }
}
console.log(classify(-2), classify(0), classify(9));
"#;
    assert_eq!(printed(source), vec!["negative zero positive"]);
}

#[test]
fn test_break_outside_loop_is_fatal() {
    assert_eq!(runtime_kind("break;"), RuntimeErrorKind::BreakOutsideLoop);
}

#[test]
fn test_break_escaping_function_cannot_be_caught() {
    let source = r#"
function stray() { break; }
let i = 0;
while (i < 1) {
  i = i + 1;
  try { stray(); } catch (e) { console.log("caught"); }
}
"#;
    let mut session = InterpreterSession::captured();
    let err = session.evaluate(source).unwrap_err();
    assert_eq!(
        err.runtime().map(|e| e.kind.clone()),
        Some(RuntimeErrorKind::BreakOutsideLoop)
    );
    assert!(session.output().is_empty());
}

#[test]
fn test_try_catch_receives_thrown_string() {
    assert_eq!(
        printed("try { throw \"boom\"; } catch (e) { console.log(e); }"),
        vec!["boom"]
    );
}

#[test]
fn test_catch_receives_message_text() {
    let source = "try { let z = 1 / 0; } catch (e) { console.log(e); }\n\
                  try { throw 42; } catch (e) { console.log(e + 1); }";
    assert_eq!(printed(source), vec!["division by zero", "421"]);
}

#[test]
fn test_catch_block_runs_against_copy_of_bindings() {
    let source = r#"
let status = "before";
let notes = [];
try { throw "x"; } catch (e) { status = "changed"; notes.push(e); }
console.log(status, notes);
"#;
    assert_eq!(printed(source), vec!["before ['x']"]);
}

#[test]
fn test_try_without_error_skips_catch() {
    let source = "let r = 0;\ntry { r = 1; } catch (e) { r = 2; }\nconsole.log(r);";
    assert_eq!(printed(source), vec!["1"]);
}

#[test]
fn test_return_from_inside_try_and_catch() {
    let source = r#"
function safe(d) { try { return 10 / d; } catch (e) { return e; } }
console.log(safe(2), safe(0));
"#;
    assert_eq!(printed(source), vec!["5 division by zero"]);
}

#[test]
fn test_uncaught_throw_stops_program() {
    let mut session = InterpreterSession::captured();
    let err = session
        .evaluate("console.log(\"one\");\nthrow \"bad\";\nconsole.log(\"two\");")
        .unwrap_err();
    assert_eq!(err.to_string(), "runtime error: bad at line 2, column 1");
    assert_eq!(session.output(), ["one"]);
}

#[test]
fn test_top_level_return_ends_program() {
    let mut session = InterpreterSession::captured();
    let value = session
        .evaluate("console.log(\"before\"); return 7; console.log(\"after\");")
        .unwrap();
    assert_eq!(value, crate::Value::Number(7.0));
    assert_eq!(session.output(), ["before"]);
}
