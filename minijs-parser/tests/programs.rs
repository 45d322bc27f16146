use minijs_parser::{
    parse, parse_program, parse_with_source, tokenize, ExpressionKind, ParseError, StatementKind,
    SyntaxErrorKind,
};
use pretty_assertions::assert_eq;

const SAMPLE: &str = r#"
// running total
let items = [1, 2, 3];
items.push(4);
let total = 0;
for (let i = 0; i < items.length; i = i + 1) {
  total = total + items[i];
}
function describe(n) {
  return n > 5 ? "big" : "small";
}
let config = { name: "demo", size: total };
console.log(describe(total), config.name);
"#;

#[test]
fn test_sample_program_parses() {
    let program = parse_program(SAMPLE).unwrap();
    let kinds: Vec<&str> = program.statements.iter().map(|s| s.kind.name()).collect();
    assert_eq!(
        kinds,
        vec![
            "Declaration",
            "MethodCall",
            "Declaration",
            "ForStatement",
            "FunctionDeclaration",
            "Declaration",
            "ConsoleLog",
        ]
    );
}

#[test]
fn test_token_and_source_entry_points_agree() {
    let tokens = tokenize(SAMPLE).unwrap();
    let from_tokens = parse(&tokens).unwrap();
    let from_source = parse_with_source(&tokens, SAMPLE).unwrap();
    assert_eq!(from_tokens, from_source);
    assert_eq!(from_tokens.node_kinds(), parse_program(SAMPLE).unwrap().node_kinds());
}

#[test]
fn test_statement_positions() {
    let program = parse_program(SAMPLE).unwrap();
    let lines: Vec<usize> = program.statements.iter().map(|s| s.span.line).collect();
    assert_eq!(lines, vec![3, 4, 5, 6, 9, 12, 13]);
}

#[test]
fn test_method_call_statement_shape() {
    let program = parse_program("items.pop();").unwrap();
    match &program.statements[0].kind {
        StatementKind::Expression(expr) => match &expr.kind {
            ExpressionKind::MethodCall(call) => {
                assert_eq!(call.object.name, "items");
                assert_eq!(call.method.name, "pop");
                assert!(call.arguments.is_empty());
            }
            other => panic!("Expected method call, got {:?}", other),
        },
        other => panic!("Expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_first_error_wins() {
    let source = "let a = 1\nlet b = ;\n";
    match parse_program(source) {
        Err(ParseError::Syntax(err)) => {
            assert_eq!(err.kind, SyntaxErrorKind::MissingSemicolon);
            assert_eq!(err.line, 2);
        }
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_error_line_and_column_accessors() {
    let err = parse_program("let x = 1;\n  $").unwrap_err();
    assert_eq!((err.line(), err.column()), (2, 3));
    assert!(err.to_string().starts_with("lexical error"));
}
