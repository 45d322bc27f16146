use crate::ast::*;
use crate::parse_program;
use pretty_assertions::assert_eq;

fn expression(input: &str) -> Expression {
    let program = parse_program(&format!("{input};")).unwrap();
    match &program.statements[0].kind {
        StatementKind::Expression(expr) => expr.clone(),
        other => panic!("Expected expression statement, got {:?}", other),
    }
}

/// Fully parenthesized rendering used to check grouping
fn shape(expr: &Expression) -> String {
    match &expr.kind {
        ExpressionKind::Number(n) => n.to_string(),
        ExpressionKind::String(s) => format!("{s:?}"),
        ExpressionKind::Boolean(b) => b.to_string(),
        ExpressionKind::Identifier(id) => id.name.clone(),
        ExpressionKind::BinaryOp(op) => {
            format!("({} {} {})", shape(&op.left), op.operator, shape(&op.right))
        }
        ExpressionKind::UnaryOp(op) => format!("({}{})", op.operator, shape(&op.operand)),
        ExpressionKind::TernaryOp(op) => format!(
            "({} ? {} : {})",
            shape(&op.condition),
            shape(&op.then_expr),
            shape(&op.else_expr)
        ),
        other => other.name().to_string(),
    }
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_eq!(shape(&expression("1 + 2 * 3")), "(1 + (2 * 3))");
    assert_eq!(shape(&expression("1 * 2 + 3")), "((1 * 2) + 3)");
}

#[test]
fn test_additive_is_left_associative() {
    assert_eq!(shape(&expression("10 - 4 - 3")), "((10 - 4) - 3)");
    assert_eq!(shape(&expression("8 / 4 / 2")), "((8 / 4) / 2)");
}

#[test]
fn test_comparison_below_arithmetic() {
    assert_eq!(shape(&expression("a + 1 > b * 2")), "((a + 1) > (b * 2))");
    assert_eq!(shape(&expression("x == y != z")), "((x == y) != z)");
}

#[test]
fn test_logical_below_comparison() {
    assert_eq!(
        shape(&expression("a > 1 && b < 2 || c")),
        "(((a > 1) && (b < 2)) || c)"
    );
}

#[test]
fn test_ternary_is_lowest_and_right_associative() {
    assert_eq!(
        shape(&expression("a && b ? 1 : c ? 2 : 3")),
        "((a && b) ? 1 : (c ? 2 : 3))"
    );
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(shape(&expression("(1 + 2) * 3")), "((1 + 2) * 3)");
}

#[test]
fn test_unary_operators() {
    assert_eq!(shape(&expression("!done")), "(!done)");
    assert_eq!(shape(&expression("-x * 2")), "((-x) * 2)");
    assert_eq!(shape(&expression("!!flag")), "(!(!flag))");
}

#[test]
fn test_literals() {
    assert_eq!(expression("3.5").kind, ExpressionKind::Number(3.5));
    assert_eq!(
        expression("\"hi\"").kind,
        ExpressionKind::String("hi".to_string())
    );
    assert_eq!(expression("true").kind, ExpressionKind::Boolean(true));
    assert_eq!(expression("false").kind, ExpressionKind::Boolean(false));
}

#[test]
fn test_array_literal_and_access() {
    match expression("[1, \"two\", [3]]").kind {
        ExpressionKind::ArrayLiteral(elements) => {
            assert_eq!(elements.len(), 3);
            assert!(matches!(elements[2].kind, ExpressionKind::ArrayLiteral(_)));
        }
        other => panic!("Expected array literal, got {:?}", other),
    }

    match expression("items[i + 1]").kind {
        ExpressionKind::ArrayAccess(access) => {
            assert_eq!(access.array.name, "items");
            assert_eq!(shape(&access.index), "(i + 1)");
        }
        other => panic!("Expected array access, got {:?}", other),
    }

    assert_eq!(expression("[]").kind, ExpressionKind::ArrayLiteral(vec![]));
}

#[test]
fn test_object_literal_keeps_order() {
    match expression("{ b: 1, a: \"x\", \"quoted key\": true }").kind {
        ExpressionKind::ObjectLiteral(properties) => {
            let keys: Vec<&str> = properties.iter().map(|p| p.key.as_str()).collect();
            assert_eq!(keys, vec!["b", "a", "quoted key"]);
        }
        other => panic!("Expected object literal, got {:?}", other),
    }
}

#[test]
fn test_property_access_and_method_call() {
    match expression("list.length").kind {
        ExpressionKind::PropertyAccess(access) => {
            assert_eq!(access.object.name, "list");
            assert_eq!(access.property.name, "length");
        }
        other => panic!("Expected property access, got {:?}", other),
    }

    match expression("list.push(4, 5)").kind {
        ExpressionKind::MethodCall(call) => {
            assert_eq!(call.object.name, "list");
            assert_eq!(call.method.name, "push");
            assert_eq!(call.arguments.len(), 2);
        }
        other => panic!("Expected method call, got {:?}", other),
    }
}

#[test]
fn test_console_log_arguments() {
    match expression("console.log(\"a\", 1 + 1)").kind {
        ExpressionKind::ConsoleLog(arguments) => {
            assert_eq!(arguments.len(), 2);
            assert_eq!(shape(&arguments[1]), "(1 + 1)");
        }
        other => panic!("Expected console.log, got {:?}", other),
    }
}

#[test]
fn test_expression_spans() {
    let expr = expression("  a + bb");
    assert_eq!((expr.span.start, expr.span.end), (2, 8));
    assert_eq!(expr.span.column, 3);
}
