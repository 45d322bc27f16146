use minijs_checker::{analyze, ScopeError};
use minijs_parser::parse_program;
use pretty_assertions::assert_eq;

fn undeclared_count(errors: &[ScopeError]) -> usize {
    errors.iter().filter(|e| e.is_undeclared()).count()
}

#[test]
fn test_declared_then_used_in_same_or_nested_scope() {
    let sources = [
        "let x = 1; console.log(x);",
        "var x; if (true) { x = 2; }",
        "const x = 3; while (false) { if (true) { console.log(x); } }",
        "let x = 1; function f() { return x; }",
        "let x = 1; for (;;) { switch (x) { case 1: x = 2; } break; }",
    ];
    for source in sources {
        let errors = analyze(&parse_program(source).unwrap());
        assert_eq!(undeclared_count(&errors), 0, "{source}");
    }
}

#[test]
fn test_single_undeclared_use() {
    for source in ["console.log(nope);", "nope = 1;", "let a = nope;", "if (nope) { }"] {
        let errors = analyze(&parse_program(source).unwrap());
        assert_eq!(undeclared_count(&errors), 1, "{source}");
    }
}

#[test]
fn test_double_declaration_in_one_scope() {
    for source in ["let d = 1; let d = 2;", "if (true) { var d; const d = 1; }"] {
        let errors = analyze(&parse_program(source).unwrap());
        assert_eq!(errors.len(), 1, "{source}");
        assert!(matches!(errors[0], ScopeError::AlreadyDeclared { .. }));
    }
}

#[test]
fn test_diagnostic_spans_point_at_names() {
    let source = "let first = 1;\nlet first = 2;";
    let errors = analyze(&parse_program(source).unwrap());
    match &errors[0] {
        ScopeError::AlreadyDeclared { span, previous, .. } => {
            assert_eq!(span.offset(), 19);
            assert_eq!(previous.offset(), 4);
            assert_eq!(span.len(), 5);
        }
        other => panic!("Expected AlreadyDeclared, got {:?}", other),
    }
}
