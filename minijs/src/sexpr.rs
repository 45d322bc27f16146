// S-expression formatter for minijs ASTs
// Renders the tree as compact Lisp-like text for the `parse` command and the REPL

use minijs_interpreter::format_number;
use minijs_parser::*;

const INLINE_WIDTH: usize = 60;

pub fn format_program_as_sexpr(program: &Program) -> String {
    let items = program
        .statements
        .iter()
        .map(|stmt| format_statement(stmt, 2))
        .collect();
    list("program", items, 0, program.statements.len() > 1)
}

/// `(head part ...)` on one line when short, otherwise one part per line
fn list(head: &str, parts: Vec<String>, indent: usize, force_break: bool) -> String {
    if parts.is_empty() {
        return format!("({head})");
    }

    let width = head.len() + parts.iter().map(|p| p.len() + 1).sum::<usize>();
    let inline = !force_break && width < INLINE_WIDTH && parts.iter().all(|p| !p.contains('\n'));
    if inline {
        return format!("({} {})", head, parts.join(" "));
    }

    let pad = " ".repeat(indent + 2);
    let body: Vec<String> = parts.iter().map(|p| format!("{pad}{p}")).collect();
    format!("({}\n{})", head, body.join("\n"))
}

fn format_block(statements: &[Statement], indent: usize) -> String {
    let parts = statements
        .iter()
        .map(|stmt| format_statement(stmt, indent + 2))
        .collect();
    list("block", parts, indent, statements.len() > 1)
}

fn format_statement(statement: &Statement, indent: usize) -> String {
    let inner = indent + 2;
    match &statement.kind {
        StatementKind::Expression(expr) => format_expression(expr, indent),
        StatementKind::Declaration(decl) => {
            let mut parts = vec![decl.name.name.clone()];
            if let Some(init) = &decl.initializer {
                parts.push(format_expression(init, inner));
            }
            list(&decl.kind.to_string(), parts, indent, false)
        }
        StatementKind::Assignment(assign) => list(
            "set",
            vec![
                assign.target.name.clone(),
                format_expression(&assign.value, inner),
            ],
            indent,
            false,
        ),
        StatementKind::FunctionDeclaration(func) => list(
            "function",
            vec![
                func.name.name.clone(),
                format_parameters(&func.parameters),
                format_block(&func.body.statements, inner),
            ],
            indent,
            false,
        ),
        StatementKind::If(if_stmt) => {
            let mut parts = vec![
                format_expression(&if_stmt.condition, inner),
                format_block(&if_stmt.then_block.statements, inner),
            ];
            if let Some(else_block) = &if_stmt.else_block {
                parts.push(format_block(&else_block.statements, inner));
            }
            list("if", parts, indent, false)
        }
        StatementKind::While(while_stmt) => list(
            "while",
            vec![
                format_expression(&while_stmt.condition, inner),
                format_block(&while_stmt.body.statements, inner),
            ],
            indent,
            false,
        ),
        StatementKind::For(for_stmt) => {
            let slot = |stmt: &Option<Box<Statement>>| match stmt {
                Some(stmt) => format_statement(stmt, inner),
                None => "_".to_string(),
            };
            let condition = match &for_stmt.condition {
                Some(condition) => format_expression(condition, inner),
                None => "_".to_string(),
            };
            list(
                "for",
                vec![
                    slot(&for_stmt.init),
                    condition,
                    slot(&for_stmt.update),
                    format_block(&for_stmt.body.statements, inner),
                ],
                indent,
                false,
            )
        }
        StatementKind::Switch(switch) => {
            let mut parts = vec![format_expression(&switch.discriminant, inner)];
            for case in &switch.cases {
                let mut case_parts = vec![format_expression(&case.test, inner + 2)];
                case_parts.extend(case.body.iter().map(|s| format_statement(s, inner + 2)));
                parts.push(list("case", case_parts, inner, false));
            }
            if let Some(default) = &switch.default {
                let body = default.iter().map(|s| format_statement(s, inner + 2)).collect();
                parts.push(list("default", body, inner, false));
            }
            list("switch", parts, indent, true)
        }
        StatementKind::Break => "(break)".to_string(),
        StatementKind::TryCatch(try_catch) => list(
            "try",
            vec![
                format_block(&try_catch.try_block.statements, inner),
                list(
                    "catch",
                    vec![
                        try_catch.parameter.name.clone(),
                        format_block(&try_catch.catch_block.statements, inner + 2),
                    ],
                    inner,
                    false,
                ),
            ],
            indent,
            false,
        ),
        StatementKind::Throw(expr) => list("throw", vec![format_expression(expr, inner)], indent, false),
        StatementKind::Return(expr) => {
            let parts = expr.iter().map(|e| format_expression(e, inner)).collect();
            list("return", parts, indent, false)
        }
    }
}

fn format_parameters(parameters: &[Identifier]) -> String {
    let names: Vec<&str> = parameters.iter().map(|p| p.name.as_str()).collect();
    format!("({})", names.join(" "))
}

fn format_expressions(expressions: &[Expression], indent: usize) -> Vec<String> {
    expressions
        .iter()
        .map(|expr| format_expression(expr, indent))
        .collect()
}

fn format_expression(expr: &Expression, indent: usize) -> String {
    let inner = indent + 2;
    match &expr.kind {
        ExpressionKind::Number(n) => format_number(*n),
        ExpressionKind::String(s) => format!("\"{}\"", s.replace('"', "\\\"")),
        ExpressionKind::Boolean(b) => b.to_string(),
        ExpressionKind::Identifier(id) => id.name.clone(),
        ExpressionKind::BinaryOp(op) => list(
            op.operator.symbol(),
            vec![
                format_expression(&op.left, inner),
                format_expression(&op.right, inner),
            ],
            indent,
            false,
        ),
        ExpressionKind::UnaryOp(op) => list(
            &op.operator.to_string(),
            vec![format_expression(&op.operand, inner)],
            indent,
            false,
        ),
        ExpressionKind::TernaryOp(op) => list(
            "?",
            vec![
                format_expression(&op.condition, inner),
                format_expression(&op.then_expr, inner),
                format_expression(&op.else_expr, inner),
            ],
            indent,
            false,
        ),
        ExpressionKind::FunctionCall(call) => {
            let mut parts = vec![call.callee.name.clone()];
            parts.extend(format_expressions(&call.arguments, inner));
            list("call", parts, indent, false)
        }
        ExpressionKind::AnonymousFunction(func) => list(
            "function",
            vec![
                format_parameters(&func.parameters),
                format_block(&func.body.statements, inner),
            ],
            indent,
            false,
        ),
        ExpressionKind::ArrowFunction(func) => {
            let body = match &func.body {
                ArrowBody::Expression(body) => format_expression(body, inner),
                ArrowBody::Block(block) => format_block(&block.statements, inner),
            };
            list("=>", vec![format_parameters(&func.parameters), body], indent, false)
        }
        ExpressionKind::ArrayLiteral(elements) => {
            list("array", format_expressions(elements, inner), indent, false)
        }
        ExpressionKind::ArrayAccess(access) => list(
            "index",
            vec![
                access.array.name.clone(),
                format_expression(&access.index, inner),
            ],
            indent,
            false,
        ),
        ExpressionKind::ObjectLiteral(properties) => {
            let parts = properties
                .iter()
                .map(|p| {
                    list(
                        &p.key,
                        vec![format_expression(&p.value, inner + 2)],
                        inner,
                        false,
                    )
                })
                .collect();
            list("object", parts, indent, false)
        }
        ExpressionKind::PropertyAccess(access) => format!(
            "(. {} {})",
            access.object.name, access.property.name
        ),
        ExpressionKind::MethodCall(call) => {
            let mut parts = vec![call.object.name.clone(), call.method.name.clone()];
            parts.extend(format_expressions(&call.arguments, inner));
            list("method", parts, indent, false)
        }
        ExpressionKind::ConsoleLog(arguments) => {
            list("console.log", format_expressions(arguments, inner), indent, false)
        }
    }
}
