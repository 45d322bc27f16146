//! Visitor trait for traversing the minijs AST
//!
//! Every `visit_*` method has a default implementation that delegates to the
//! matching `walk_*` function, which performs a depth-first traversal in
//! source order. Implementors override the hooks they care about and call the
//! `walk_*` function to keep descending.
//!
//! Names reach the visitor through two leaf hooks: `visit_binding` for places
//! that introduce a name (declarations, function names, parameters, catch
//! parameters) and `visit_reference` for places that read or write one.

use minijs_parser::{
    AnonymousFunction, ArrowBody, ArrowFunction, Assignment, Block, Declaration, Expression,
    ExpressionKind, ForStatement, FunctionDeclaration, Identifier, IfStatement, Program,
    Statement, StatementKind, SwitchStatement, TryCatch, WhileStatement,
};

pub trait Visitor: Sized {
    /// Visit a program (top-level entry point)
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program)
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        walk_statement(self, stmt)
    }

    /// Visit the statements of a block
    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block)
    }

    fn visit_declaration(&mut self, decl: &Declaration) {
        walk_declaration(self, decl)
    }

    fn visit_assignment(&mut self, assign: &Assignment) {
        walk_assignment(self, assign)
    }

    fn visit_function_declaration(&mut self, func: &FunctionDeclaration) {
        walk_function_declaration(self, func)
    }

    fn visit_if_statement(&mut self, if_stmt: &IfStatement) {
        walk_if_statement(self, if_stmt)
    }

    fn visit_while_statement(&mut self, while_stmt: &WhileStatement) {
        walk_while_statement(self, while_stmt)
    }

    fn visit_for_statement(&mut self, for_stmt: &ForStatement) {
        walk_for_statement(self, for_stmt)
    }

    fn visit_switch_statement(&mut self, switch: &SwitchStatement) {
        walk_switch_statement(self, switch)
    }

    fn visit_try_catch(&mut self, try_catch: &TryCatch) {
        walk_try_catch(self, try_catch)
    }

    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr)
    }

    fn visit_anonymous_function(&mut self, func: &AnonymousFunction) {
        walk_anonymous_function(self, func)
    }

    fn visit_arrow_function(&mut self, func: &ArrowFunction) {
        walk_arrow_function(self, func)
    }

    /// A name being introduced
    fn visit_binding(&mut self, _name: &Identifier) {}

    /// A name being read, assigned or called
    fn visit_reference(&mut self, _name: &Identifier) {}
}

pub fn walk_program<V: Visitor>(visitor: &mut V, program: &Program) {
    for stmt in &program.statements {
        visitor.visit_statement(stmt);
    }
}

pub fn walk_block<V: Visitor>(visitor: &mut V, block: &Block) {
    walk_statements(visitor, &block.statements);
}

pub fn walk_statements<V: Visitor>(visitor: &mut V, statements: &[Statement]) {
    for stmt in statements {
        visitor.visit_statement(stmt);
    }
}

/// Dispatch a statement to its visitor method
pub fn walk_statement<V: Visitor>(visitor: &mut V, stmt: &Statement) {
    match &stmt.kind {
        StatementKind::Expression(expr) => visitor.visit_expression(expr),
        StatementKind::Declaration(decl) => visitor.visit_declaration(decl),
        StatementKind::Assignment(assign) => visitor.visit_assignment(assign),
        StatementKind::FunctionDeclaration(func) => visitor.visit_function_declaration(func),
        StatementKind::If(if_stmt) => visitor.visit_if_statement(if_stmt),
        StatementKind::While(while_stmt) => visitor.visit_while_statement(while_stmt),
        StatementKind::For(for_stmt) => visitor.visit_for_statement(for_stmt),
        StatementKind::Switch(switch) => visitor.visit_switch_statement(switch),
        StatementKind::TryCatch(try_catch) => visitor.visit_try_catch(try_catch),
        StatementKind::Throw(expr) => visitor.visit_expression(expr),
        StatementKind::Return(Some(expr)) => visitor.visit_expression(expr),
        StatementKind::Return(None) | StatementKind::Break => {}
    }
}

/// Initializer first, then the declared name
pub fn walk_declaration<V: Visitor>(visitor: &mut V, decl: &Declaration) {
    if let Some(init) = &decl.initializer {
        visitor.visit_expression(init);
    }
    visitor.visit_binding(&decl.name);
}

pub fn walk_assignment<V: Visitor>(visitor: &mut V, assign: &Assignment) {
    visitor.visit_reference(&assign.target);
    visitor.visit_expression(&assign.value);
}

pub fn walk_function_declaration<V: Visitor>(visitor: &mut V, func: &FunctionDeclaration) {
    visitor.visit_binding(&func.name);
    for param in &func.parameters {
        visitor.visit_binding(param);
    }
    visitor.visit_block(&func.body);
}

pub fn walk_if_statement<V: Visitor>(visitor: &mut V, if_stmt: &IfStatement) {
    visitor.visit_expression(&if_stmt.condition);
    visitor.visit_block(&if_stmt.then_block);
    if let Some(else_block) = &if_stmt.else_block {
        visitor.visit_block(else_block);
    }
}

pub fn walk_while_statement<V: Visitor>(visitor: &mut V, while_stmt: &WhileStatement) {
    visitor.visit_expression(&while_stmt.condition);
    visitor.visit_block(&while_stmt.body);
}

pub fn walk_for_statement<V: Visitor>(visitor: &mut V, for_stmt: &ForStatement) {
    if let Some(init) = &for_stmt.init {
        visitor.visit_statement(init);
    }
    if let Some(condition) = &for_stmt.condition {
        visitor.visit_expression(condition);
    }
    if let Some(update) = &for_stmt.update {
        visitor.visit_statement(update);
    }
    visitor.visit_block(&for_stmt.body);
}

pub fn walk_switch_statement<V: Visitor>(visitor: &mut V, switch: &SwitchStatement) {
    visitor.visit_expression(&switch.discriminant);
    walk_switch_cases(visitor, switch);
}

/// Case tests and bodies, then the default body
pub fn walk_switch_cases<V: Visitor>(visitor: &mut V, switch: &SwitchStatement) {
    for case in &switch.cases {
        visitor.visit_expression(&case.test);
        walk_statements(visitor, &case.body);
    }
    if let Some(default) = &switch.default {
        walk_statements(visitor, default);
    }
}

pub fn walk_try_catch<V: Visitor>(visitor: &mut V, try_catch: &TryCatch) {
    visitor.visit_block(&try_catch.try_block);
    visitor.visit_binding(&try_catch.parameter);
    visitor.visit_block(&try_catch.catch_block);
}

pub fn walk_anonymous_function<V: Visitor>(visitor: &mut V, func: &AnonymousFunction) {
    for param in &func.parameters {
        visitor.visit_binding(param);
    }
    visitor.visit_block(&func.body);
}

pub fn walk_arrow_function<V: Visitor>(visitor: &mut V, func: &ArrowFunction) {
    for param in &func.parameters {
        visitor.visit_binding(param);
    }
    match &func.body {
        ArrowBody::Expression(body) => visitor.visit_expression(body),
        ArrowBody::Block(block) => visitor.visit_block(block),
    }
}

/// Walk an expression by dispatching based on expression kind
pub fn walk_expression<V: Visitor>(visitor: &mut V, expr: &Expression) {
    match &expr.kind {
        ExpressionKind::Number(_) | ExpressionKind::String(_) | ExpressionKind::Boolean(_) => {}
        ExpressionKind::Identifier(id) => visitor.visit_reference(id),
        ExpressionKind::BinaryOp(op) => {
            visitor.visit_expression(&op.left);
            visitor.visit_expression(&op.right);
        }
        ExpressionKind::UnaryOp(op) => visitor.visit_expression(&op.operand),
        ExpressionKind::TernaryOp(op) => {
            visitor.visit_expression(&op.condition);
            visitor.visit_expression(&op.then_expr);
            visitor.visit_expression(&op.else_expr);
        }
        ExpressionKind::FunctionCall(call) => {
            visitor.visit_reference(&call.callee);
            walk_expressions(visitor, &call.arguments);
        }
        ExpressionKind::AnonymousFunction(func) => visitor.visit_anonymous_function(func),
        ExpressionKind::ArrowFunction(func) => visitor.visit_arrow_function(func),
        ExpressionKind::ArrayLiteral(elements) => walk_expressions(visitor, elements),
        ExpressionKind::ArrayAccess(access) => {
            visitor.visit_reference(&access.array);
            visitor.visit_expression(&access.index);
        }
        ExpressionKind::ObjectLiteral(properties) => {
            for property in properties {
                visitor.visit_expression(&property.value);
            }
        }
        ExpressionKind::PropertyAccess(access) => visitor.visit_reference(&access.object),
        ExpressionKind::MethodCall(call) => {
            visitor.visit_reference(&call.object);
            walk_expressions(visitor, &call.arguments);
        }
        ExpressionKind::ConsoleLog(arguments) => walk_expressions(visitor, arguments),
    }
}

fn walk_expressions<V: Visitor>(visitor: &mut V, expressions: &[Expression]) {
    for expr in expressions {
        visitor.visit_expression(expr);
    }
}
