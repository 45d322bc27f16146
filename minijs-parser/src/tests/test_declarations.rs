use crate::ast::*;
use crate::parse_program;
use pretty_assertions::assert_eq;

fn single_statement(input: &str) -> StatementKind {
    let program = parse_program(input).unwrap();
    assert_eq!(program.statements.len(), 1);
    program.statements[0].kind.clone()
}

#[test]
fn test_let_with_binary_initializer() {
    match single_statement("let x = 1 + 2;") {
        StatementKind::Declaration(decl) => {
            assert_eq!(decl.kind, DeclarationKind::Let);
            assert_eq!(decl.name.name, "x");
            match decl.initializer.map(|e| e.kind) {
                Some(ExpressionKind::BinaryOp(op)) => {
                    assert_eq!(op.operator, BinaryOperator::Add);
                    assert_eq!(op.left.kind, ExpressionKind::Number(1.0));
                    assert_eq!(op.right.kind, ExpressionKind::Number(2.0));
                }
                other => panic!("Expected binary initializer, got {:?}", other),
            }
        }
        other => panic!("Expected declaration, got {:?}", other),
    }
}

#[test]
fn test_declaration_keywords() {
    for (source, expected) in [
        ("var a;", DeclarationKind::Var),
        ("let a;", DeclarationKind::Let),
        ("const a = 1;", DeclarationKind::Const),
    ] {
        match single_statement(source) {
            StatementKind::Declaration(decl) => assert_eq!(decl.kind, expected),
            other => panic!("Expected declaration, got {:?}", other),
        }
    }
}

#[test]
fn test_declaration_without_initializer() {
    match single_statement("var counter;") {
        StatementKind::Declaration(decl) => {
            assert_eq!(decl.name.name, "counter");
            assert!(decl.initializer.is_none());
        }
        other => panic!("Expected declaration, got {:?}", other),
    }
}

#[test]
fn test_assignment_statement() {
    match single_statement("total = total + 1;") {
        StatementKind::Assignment(assign) => {
            assert_eq!(assign.target.name, "total");
            assert!(matches!(assign.value.kind, ExpressionKind::BinaryOp(_)));
        }
        other => panic!("Expected assignment, got {:?}", other),
    }
}

#[test]
fn test_declaration_node_kinds() {
    let program = parse_program("let x = 1 + 2;").unwrap();
    assert_eq!(
        program.node_kinds(),
        vec!["Program", "Declaration", "Identifier", "BinaryOp", "Number", "Number"]
    );
}

#[test]
fn test_node_kinds_are_deterministic() {
    let source = "function f(a) { if (a > 1) { return a; } } let r = f(2); console.log(r);";
    let first = parse_program(source).unwrap().node_kinds();
    let second = parse_program(source).unwrap().node_kinds();
    assert_eq!(first, second);
    assert_eq!(first[0], "Program");
    assert!(first.contains(&"FunctionDeclaration"));
    assert!(first.contains(&"ConsoleLog"));
}

#[test]
fn test_statement_spans_cover_semicolon() {
    let program = parse_program("let x = 10;").unwrap();
    let span = program.statements[0].span;
    assert_eq!((span.start, span.end), (0, 11));
    assert_eq!((span.line, span.column), (1, 1));
}

#[test]
fn test_comments_collected_on_program() {
    let tokens = crate::tokenize_with(
        "// header\nlet x = 1; // trailing\n",
        crate::LexerConfig::with_comments(),
    )
    .unwrap();
    let program = crate::parse(&tokens).unwrap();

    assert_eq!(program.statements.len(), 1);
    let texts: Vec<&str> = program.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["header", "trailing"]);
}

#[test]
fn test_empty_program() {
    let program = parse_program("").unwrap();
    assert!(program.statements.is_empty());
    assert_eq!(program.node_kinds(), vec!["Program"]);
}
