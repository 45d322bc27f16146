//! Scope checker
//!
//! Collects every redeclaration and every use of an undeclared name across the
//! whole program; it never stops at the first problem.

use crate::error::ScopeError;
use crate::scope::ScopeStack;
use crate::visitor::{self, Visitor};
use log::{debug, trace};
use minijs_parser::{
    AnonymousFunction, ArrowFunction, ForStatement, FunctionDeclaration, Identifier, IfStatement,
    Program, SwitchStatement, TryCatch, WhileStatement,
};

#[derive(Debug, Clone, Default)]
pub struct ScopeChecker {
    scopes: ScopeStack,
    errors: Vec<ScopeError>,
}

impl ScopeChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `program`, returning the diagnostics in traversal order.
    ///
    /// Global declarations stay in the checker afterwards, so the same checker
    /// can be used for consecutive snippets.
    pub fn analyze(&mut self, program: &Program) -> Vec<ScopeError> {
        debug!(
            target: "minijs::checker",
            "checking {} statements",
            program.statements.len()
        );
        self.visit_program(program);
        let errors = std::mem::take(&mut self.errors);
        debug!(target: "minijs::checker", "{} scope diagnostics", errors.len());
        errors
    }

    fn declare(&mut self, name: &Identifier) {
        trace!(target: "minijs::checker", "declare {} at depth {}", name.name, self.scopes.depth());
        if let Err(previous) = self.scopes.declare(&name.name, name.span) {
            self.errors.push(ScopeError::already_declared(name, previous));
        }
    }

    fn resolve(&mut self, name: &Identifier) {
        if self.scopes.lookup(&name.name).is_none() {
            trace!(target: "minijs::checker", "unresolved {}", name.name);
            self.errors.push(ScopeError::undeclared(name));
        }
    }

    fn in_scope(&mut self, f: impl FnOnce(&mut Self)) {
        self.scopes.push();
        f(self);
        self.scopes.pop();
    }
}

impl Visitor for ScopeChecker {
    fn visit_binding(&mut self, name: &Identifier) {
        self.declare(name);
    }

    fn visit_reference(&mut self, name: &Identifier) {
        self.resolve(name);
    }

    fn visit_function_declaration(&mut self, func: &FunctionDeclaration) {
        self.declare(&func.name);
        self.in_scope(|checker| {
            for param in &func.parameters {
                checker.declare(param);
            }
            visitor::walk_block(checker, &func.body);
        });
    }

    fn visit_anonymous_function(&mut self, func: &AnonymousFunction) {
        self.in_scope(|checker| visitor::walk_anonymous_function(checker, func));
    }

    fn visit_arrow_function(&mut self, func: &ArrowFunction) {
        self.in_scope(|checker| visitor::walk_arrow_function(checker, func));
    }

    fn visit_if_statement(&mut self, if_stmt: &IfStatement) {
        self.visit_expression(&if_stmt.condition);
        self.in_scope(|checker| visitor::walk_block(checker, &if_stmt.then_block));
        if let Some(else_block) = &if_stmt.else_block {
            self.in_scope(|checker| visitor::walk_block(checker, else_block));
        }
    }

    fn visit_while_statement(&mut self, while_stmt: &WhileStatement) {
        self.visit_expression(&while_stmt.condition);
        self.in_scope(|checker| visitor::walk_block(checker, &while_stmt.body));
    }

    fn visit_for_statement(&mut self, for_stmt: &ForStatement) {
        self.in_scope(|checker| {
            if let Some(init) = &for_stmt.init {
                checker.visit_statement(init);
            }
            if let Some(condition) = &for_stmt.condition {
                checker.visit_expression(condition);
            }
            if let Some(update) = &for_stmt.update {
                checker.visit_statement(update);
            }
            checker.in_scope(|checker| visitor::walk_block(checker, &for_stmt.body));
        });
    }

    fn visit_switch_statement(&mut self, switch: &SwitchStatement) {
        self.visit_expression(&switch.discriminant);
        self.in_scope(|checker| visitor::walk_switch_cases(checker, switch));
    }

    fn visit_try_catch(&mut self, try_catch: &TryCatch) {
        self.in_scope(|checker| visitor::walk_block(checker, &try_catch.try_block));
        self.in_scope(|checker| {
            checker.declare(&try_catch.parameter);
            visitor::walk_block(checker, &try_catch.catch_block);
        });
    }
}
