use crate::{run_source, PipelineError, RuntimeErrorKind};
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
fn test_push_then_length() {
    assert_eq!(
        printed("let a = [1,2,3]; a.push(4); console.log(a.length);"),
        vec!["4"]
    );
}

#[test]
fn test_push_returns_new_length_and_pop_returns_element() {
    let source = "let a = [];\nconsole.log(a.push(5, 6), a.pop(), a.pop(), a.pop(), a.length);";
    assert_eq!(printed(source), vec!["2 6 5 undefined 0"]);
}

#[test]
fn test_arrays_are_shared_between_aliases() {
    let source = "let a = [1];\nlet b = a;\nb.push(2);\nconsole.log(a, a == b);";
    assert_eq!(printed(source), vec!["[1, 2] true"]);
}

#[test]
fn test_array_indexing() {
    assert_eq!(
        printed("let a = [10, 20];\nconsole.log(a[0] + a[1], a[2 - 1]);"),
        vec!["30 20"]
    );
}

#[test]
fn test_index_errors() {
    assert_eq!(
        runtime_kind("let a = [10, 20];\na[2];"),
        RuntimeErrorKind::IndexOutOfRange { index: 2, length: 2 }
    );
    assert_eq!(
        runtime_kind("let a = [10, 20];\na[-1];"),
        RuntimeErrorKind::IndexOutOfRange { index: -1, length: 2 }
    );
    assert_eq!(
        runtime_kind("let a = [10, 20];\na[0.5];"),
        RuntimeErrorKind::IndexNotInteger("0.5".to_string())
    );
    assert_eq!(
        runtime_kind("let s = 5;\ns[0];"),
        RuntimeErrorKind::NotAnArray("s".to_string())
    );
}

#[test]
fn test_object_literals_and_property_access() {
    let source = "let p = {name: \"ada\", \"age\": 36};\nconsole.log(p.name, p.age, p);";
    assert_eq!(printed(source), vec!["ada 36 {name: 'ada', age: 36}"]);
}

#[test]
fn test_missing_property() {
    assert_eq!(
        runtime_kind("let p = {name: \"ada\"};\np.email;"),
        RuntimeErrorKind::PropertyNotFound("email".to_string())
    );
    assert_eq!(
        runtime_kind("let n = 3;\nn.size;"),
        RuntimeErrorKind::PropertyNotFound("size".to_string())
    );
}

#[test]
fn test_string_length() {
    assert_eq!(printed("let s = \"hello\";\nconsole.log(s.length);"), vec!["5"]);
}

#[test]
fn test_method_errors() {
    assert_eq!(
        runtime_kind("let a = [1];\na.map(1);"),
        RuntimeErrorKind::UnsupportedMethod("map".to_string())
    );
    assert_eq!(
        runtime_kind("let o = {};\no.push(1);"),
        RuntimeErrorKind::NotAnArray("o".to_string())
    );
}

#[test]
fn test_nested_container_display() {
    let source = "let m = [[1, \"two\"], {k: [true]}, {}];\nconsole.log(m);";
    assert_eq!(printed(source), vec!["[[1, 'two'], {k: [true]}, {}]"]);
}

#[test]
fn test_structural_equality_of_containers() {
    assert_eq!(
        printed("console.log([1, 2] == [1, 2], [1] == [2], {a: 1} != {a: 1});"),
        vec!["true false false"]
    );
}

#[test]
fn test_self_referencing_array_displays_circular() {
    let source = "let a = [1];\na.push(a);\nconsole.log(a);";
    assert_eq!(printed(source), vec!["[1, [Circular]]"]);
}
