//! Core interpreter implementation for evaluating minijs AST nodes.
//!
//! Statements return a [`Flow`] telling the caller how execution completed;
//! thrown values and runtime faults travel as `Err(RuntimeError)`. Loops
//! consume `Flow::Break`, calls consume `Flow::Return`, and `try` consumes
//! catchable errors.

use crate::environment::{Bindings, Environment};
use crate::error::{Result, RuntimeError, RuntimeErrorKind};
use crate::value::{Callable, CallableBody, Value};
use indexmap::IndexMap;
use log::{debug, trace};
use minijs_parser::{
    ArrayAccess, ArrowBody, BinaryOperation, BinaryOperator, Expression, ExpressionKind,
    ForStatement, FunctionCall, Identifier, MethodCall, Program, PropertyAccess, Span, Statement,
    StatementKind, SwitchStatement, TryCatch, UnaryOperation, UnaryOperator,
};
use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

/// Interpreter options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Calls nested deeper than this fail with a stack overflow error
    pub max_call_depth: usize,
    /// Bind a `catch` parameter to the thrown value itself rather than its
    /// message text
    pub preserve_thrown_values: bool,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_call_depth: 128,
            preserve_thrown_values: false,
        }
    }
}

/// How a statement completed
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    Break,
    Return(Value),
}

/// The main interpreter for evaluating minijs programs
pub struct Interpreter {
    environment: Environment,
    config: InterpreterConfig,
    /// Destination of `console.log`
    writer: Box<dyn Write>,
    /// Every line `console.log` produced, in order
    output: Vec<String>,
    depth: usize,
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("environment", &self.environment)
            .field("config", &self.config)
            .field("output", &self.output)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Create an interpreter writing console output to stdout
    pub fn new() -> Self {
        Self::with_config(InterpreterConfig::default())
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        Self {
            environment: Environment::new(),
            config,
            writer: Box::new(io::stdout()),
            output: Vec::new(),
            depth: 0,
        }
    }

    /// Create an interpreter that only records console output
    pub fn captured() -> Self {
        Self::new().with_writer(io::sink())
    }

    pub fn with_writer(mut self, writer: impl Write + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    /// Lines written by `console.log` so far
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Forget all bindings, functions and recorded output
    pub fn reset(&mut self) {
        self.environment.clear();
        self.output.clear();
        self.depth = 0;
    }

    /// Execute a complete program
    pub fn execute(&mut self, program: &Program) -> Result<()> {
        self.run(program).map(|_| ())
    }

    /// Execute a complete program, returning the value of its final
    /// statement when that statement is an expression
    pub fn run(&mut self, program: &Program) -> Result<Value> {
        debug!("executing {} top-level statements", program.statements.len());
        let mut completion = Value::Undefined;

        for statement in &program.statements {
            if let StatementKind::Expression(expr) = &statement.kind {
                completion = self.evaluate(expr)?;
                continue;
            }
            completion = Value::Undefined;
            match self.execute_statement(statement)? {
                Flow::Normal => {}
                Flow::Break => {
                    return Err(RuntimeError::with_span(
                        RuntimeErrorKind::BreakOutsideLoop,
                        statement.span,
                    ));
                }
                Flow::Return(value) => return Ok(value),
            }
        }

        Ok(completion)
    }

    fn execute_block(&mut self, statements: &[Statement]) -> Result<Flow> {
        for statement in statements {
            match self.execute_statement(statement)? {
                Flow::Normal => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    pub fn execute_statement(&mut self, statement: &Statement) -> Result<Flow> {
        match &statement.kind {
            StatementKind::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }
            StatementKind::Declaration(decl) => {
                let value = match &decl.initializer {
                    Some(init) => self.evaluate(init)?,
                    None => Value::Undefined,
                };
                self.environment.define(decl.name.name.as_str(), value);
                Ok(Flow::Normal)
            }
            StatementKind::Assignment(assign) => {
                let value = self.evaluate(&assign.value)?;
                self.environment.set(&assign.target.name, value);
                Ok(Flow::Normal)
            }
            StatementKind::FunctionDeclaration(func) => {
                let callable = Callable::new(
                    Some(func.name.name.clone()),
                    parameter_names(&func.parameters),
                    CallableBody::Block(func.body.clone()),
                );
                self.environment
                    .define_function(func.name.name.as_str(), Rc::new(callable));
                Ok(Flow::Normal)
            }
            StatementKind::If(if_stmt) => {
                if self.evaluate(&if_stmt.condition)?.is_truthy() {
                    self.execute_block(&if_stmt.then_block.statements)
                } else if let Some(else_block) = &if_stmt.else_block {
                    self.execute_block(&else_block.statements)
                } else {
                    Ok(Flow::Normal)
                }
            }
            StatementKind::While(while_stmt) => {
                while self.evaluate(&while_stmt.condition)?.is_truthy() {
                    match self.execute_block(&while_stmt.body.statements)? {
                        Flow::Normal => {}
                        Flow::Break => break,
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::Normal)
            }
            StatementKind::For(for_stmt) => self.execute_for(for_stmt),
            StatementKind::Switch(switch) => self.execute_switch(switch),
            StatementKind::Break => Ok(Flow::Break),
            StatementKind::TryCatch(try_catch) => self.execute_try_catch(try_catch),
            StatementKind::Throw(expr) => {
                let value = self.evaluate(expr)?;
                Err(RuntimeError::thrown(value, statement.span))
            }
            StatementKind::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Undefined,
                };
                Ok(Flow::Return(value))
            }
        }
    }

    fn execute_for(&mut self, for_stmt: &ForStatement) -> Result<Flow> {
        if let Some(init) = &for_stmt.init {
            self.execute_statement(init)?;
        }

        loop {
            if let Some(condition) = &for_stmt.condition {
                if !self.evaluate(condition)?.is_truthy() {
                    break;
                }
            }
            match self.execute_block(&for_stmt.body.statements)? {
                Flow::Normal => {}
                Flow::Break => break,
                flow @ Flow::Return(_) => return Ok(flow),
            }
            if let Some(update) = &for_stmt.update {
                self.execute_statement(update)?;
            }
        }

        Ok(Flow::Normal)
    }

    /// Run the first case whose test equals the discriminant, or the default.
    /// Cases never fall through, and a `break` in a case belongs to the
    /// enclosing loop.
    fn execute_switch(&mut self, switch: &SwitchStatement) -> Result<Flow> {
        let discriminant = self.evaluate(&switch.discriminant)?;

        for case in &switch.cases {
            if self.evaluate(&case.test)?.equals(&discriminant) {
                return self.execute_block(&case.body);
            }
        }

        match &switch.default {
            Some(body) => self.execute_block(body),
            None => Ok(Flow::Normal),
        }
    }

    /// The catch block runs against a copy of the active bindings; the
    /// original bindings are reinstated when it finishes.
    fn execute_try_catch(&mut self, try_catch: &TryCatch) -> Result<Flow> {
        let error = match self.execute_block(&try_catch.try_block.statements) {
            Err(error) if error.is_catchable() => error,
            completed => return completed,
        };
        debug!("caught {error}");

        let payload = match error.kind {
            RuntimeErrorKind::Thrown(value) if self.config.preserve_thrown_values => value,
            kind => Value::String(kind.to_string()),
        };

        let saved = self.environment.snapshot();
        self.environment
            .define(try_catch.parameter.name.as_str(), payload);
        let result = self.execute_block(&try_catch.catch_block.statements);
        self.environment.restore(saved);
        result
    }

    /// Evaluate an expression
    pub fn evaluate(&mut self, expr: &Expression) -> Result<Value> {
        match &expr.kind {
            ExpressionKind::Number(n) => Ok(Value::Number(*n)),
            ExpressionKind::String(s) => Ok(Value::String(s.clone())),
            ExpressionKind::Boolean(b) => Ok(Value::Boolean(*b)),
            ExpressionKind::Identifier(id) => self.lookup(id),
            ExpressionKind::BinaryOp(op) => self.evaluate_binary(op),
            ExpressionKind::UnaryOp(op) => self.evaluate_unary(op),
            ExpressionKind::TernaryOp(op) => {
                if self.evaluate(&op.condition)?.is_truthy() {
                    self.evaluate(&op.then_expr)
                } else {
                    self.evaluate(&op.else_expr)
                }
            }
            ExpressionKind::FunctionCall(call) => self.evaluate_call(call),
            ExpressionKind::AnonymousFunction(func) => Ok(Value::Function(Rc::new(Callable::new(
                None,
                parameter_names(&func.parameters),
                CallableBody::Block(func.body.clone()),
            )))),
            ExpressionKind::ArrowFunction(func) => {
                let body = match &func.body {
                    ArrowBody::Expression(body) => CallableBody::Expression(body.as_ref().clone()),
                    ArrowBody::Block(block) => CallableBody::Block(block.clone()),
                };
                Ok(Value::Function(Rc::new(Callable::new(
                    None,
                    parameter_names(&func.parameters),
                    body,
                ))))
            }
            ExpressionKind::ArrayLiteral(elements) => {
                let items = self.evaluate_arguments(elements)?;
                Ok(Value::array(items))
            }
            ExpressionKind::ArrayAccess(access) => self.evaluate_index(access),
            ExpressionKind::ObjectLiteral(properties) => {
                let mut object = IndexMap::with_capacity(properties.len());
                for property in properties {
                    let value = self.evaluate(&property.value)?;
                    object.insert(property.key.clone(), value);
                }
                Ok(Value::object(object))
            }
            ExpressionKind::PropertyAccess(access) => self.evaluate_property(access),
            ExpressionKind::MethodCall(call) => self.evaluate_method_call(call),
            ExpressionKind::ConsoleLog(arguments) => self.console_log(arguments, expr.span),
        }
    }

    /// Variables first, then named functions
    fn lookup(&self, id: &Identifier) -> Result<Value> {
        if let Some(value) = self.environment.get(&id.name) {
            return Ok(value.clone());
        }
        if let Some(callable) = self.environment.function(&id.name) {
            return Ok(Value::Function(callable.clone()));
        }
        Err(RuntimeError::undefined_variable(&id.name, id.span))
    }

    fn evaluate_arguments(&mut self, arguments: &[Expression]) -> Result<Vec<Value>> {
        arguments.iter().map(|arg| self.evaluate(arg)).collect()
    }

    fn evaluate_binary(&mut self, op: &BinaryOperation) -> Result<Value> {
        let left = self.evaluate(&op.left)?;

        let short_circuit = match op.operator {
            BinaryOperator::LogicalAnd => !left.is_truthy(),
            BinaryOperator::LogicalOr => left.is_truthy(),
            _ => false,
        };
        if short_circuit {
            return Ok(left);
        }

        let right = self.evaluate(&op.right)?;
        apply_binary(op.operator, &left, &right, op.span)
    }

    fn evaluate_unary(&mut self, op: &UnaryOperation) -> Result<Value> {
        let operand = self.evaluate(&op.operand)?;
        match op.operator {
            UnaryOperator::Not => Ok(Value::Boolean(!operand.is_truthy())),
            UnaryOperator::Negate => match operand {
                Value::Number(n) => Ok(Value::Number(-n)),
                other => Err(RuntimeError::invalid_operand("-", &other, op.span)),
            },
        }
    }

    fn evaluate_call(&mut self, call: &FunctionCall) -> Result<Value> {
        let callable = self.resolve_callable(&call.callee)?;
        let arguments = self.evaluate_arguments(&call.arguments)?;
        self.call(&callable, arguments, call.span)
    }

    /// Named functions first, then a function value bound to the name
    fn resolve_callable(&self, callee: &Identifier) -> Result<Rc<Callable>> {
        if let Some(callable) = self.environment.function(&callee.name) {
            return Ok(callable.clone());
        }
        match self.environment.get(&callee.name) {
            Some(Value::Function(callable)) => Ok(callable.clone()),
            Some(other) => Err(RuntimeError::not_callable(&callee.name, other, callee.span)),
            None => Err(RuntimeError::undefined_function(&callee.name, callee.span)),
        }
    }

    /// Invoke `callable` in a fresh frame holding only its parameters.
    ///
    /// Missing arguments are `undefined`; extra arguments are ignored.
    pub fn call(&mut self, callable: &Callable, arguments: Vec<Value>, span: Span) -> Result<Value> {
        if self.depth >= self.config.max_call_depth {
            return Err(RuntimeError::with_span(
                RuntimeErrorKind::StackOverflow(self.config.max_call_depth),
                span,
            ));
        }
        trace!(
            "call {} with {} argument(s) at depth {}",
            callable.display_name(),
            arguments.len(),
            self.depth
        );

        let mut arguments = arguments.into_iter();
        let frame: Bindings = callable
            .parameters
            .iter()
            .map(|name| (name.clone(), arguments.next().unwrap_or(Value::Undefined)))
            .collect();

        let saved = self.environment.swap_active(frame);
        self.depth += 1;
        let result = self.run_body(callable, span);
        self.depth -= 1;
        self.environment.restore(saved);

        trace!("return from {}", callable.display_name());
        result
    }

    fn run_body(&mut self, callable: &Callable, span: Span) -> Result<Value> {
        match &callable.body {
            CallableBody::Expression(expr) => self.evaluate(expr),
            CallableBody::Block(block) => match self.execute_block(&block.statements)? {
                Flow::Normal => Ok(Value::Undefined),
                Flow::Return(value) => Ok(value),
                Flow::Break => Err(RuntimeError::with_span(
                    RuntimeErrorKind::BreakOutsideLoop,
                    span,
                )),
            },
        }
    }

    fn evaluate_index(&mut self, access: &ArrayAccess) -> Result<Value> {
        let target = self.lookup(&access.array)?;
        let index = self.evaluate(&access.index)?;

        let Value::Array(items) = &target else {
            return Err(RuntimeError::with_span(
                RuntimeErrorKind::NotAnArray(access.array.name.clone()),
                access.array.span,
            ));
        };
        let position = match index {
            Value::Number(n) if n.fract() == 0.0 => n,
            other => {
                return Err(RuntimeError::with_span(
                    RuntimeErrorKind::IndexNotInteger(other.to_string()),
                    access.index.span,
                ));
            }
        };

        let items = items.borrow();
        if position < 0.0 || position >= items.len() as f64 {
            return Err(RuntimeError::with_span(
                RuntimeErrorKind::IndexOutOfRange {
                    index: position as i64,
                    length: items.len(),
                },
                access.span,
            ));
        }
        Ok(items[position as usize].clone())
    }

    fn evaluate_property(&mut self, access: &PropertyAccess) -> Result<Value> {
        let target = self.lookup(&access.object)?;
        let name = access.property.name.as_str();

        let found = match (&target, name) {
            (Value::Array(items), "length") => Some(Value::Number(items.borrow().len() as f64)),
            (Value::String(s), "length") => Some(Value::Number(s.chars().count() as f64)),
            (Value::Object(properties), _) => properties.borrow().get(name).cloned(),
            _ => None,
        };

        found.ok_or_else(|| {
            RuntimeError::with_span(
                RuntimeErrorKind::PropertyNotFound(name.to_string()),
                access.property.span,
            )
        })
    }

    fn evaluate_method_call(&mut self, call: &MethodCall) -> Result<Value> {
        let target = self.lookup(&call.object)?;
        let arguments = self.evaluate_arguments(&call.arguments)?;
        let method = call.method.name.as_str();

        match (&target, method) {
            (Value::Array(items), "push") => {
                let mut items = items.borrow_mut();
                items.extend(arguments);
                Ok(Value::Number(items.len() as f64))
            }
            (Value::Array(items), "pop") => Ok(items.borrow_mut().pop().unwrap_or(Value::Undefined)),
            (_, "push" | "pop") => Err(RuntimeError::with_span(
                RuntimeErrorKind::NotAnArray(call.object.name.clone()),
                call.object.span,
            )),
            _ => Err(RuntimeError::with_span(
                RuntimeErrorKind::UnsupportedMethod(method.to_string()),
                call.method.span,
            )),
        }
    }

    fn console_log(&mut self, arguments: &[Expression], span: Span) -> Result<Value> {
        let values = self.evaluate_arguments(arguments)?;
        let line = values
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        trace!(target: "minijs::console", "{line}");
        writeln!(self.writer, "{line}")
            .and_then(|_| self.writer.flush())
            .map_err(|err| RuntimeError::with_span(RuntimeErrorKind::Output(err.to_string()), span))?;
        self.output.push(line);
        Ok(Value::Undefined)
    }
}

fn parameter_names(parameters: &[Identifier]) -> Vec<String> {
    parameters.iter().map(|p| p.name.clone()).collect()
}

/// Apply a non-short-circuiting binary operator to two evaluated operands
pub fn apply_binary(
    operator: BinaryOperator,
    left: &Value,
    right: &Value,
    span: Span,
) -> Result<Value> {
    match operator {
        BinaryOperator::Add => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(_), _) | (_, Value::String(_)) => {
                Ok(Value::String(format!("{left}{right}")))
            }
            _ => Err(RuntimeError::invalid_operands("+", left, right, span)),
        },
        BinaryOperator::Subtract => {
            let (a, b) = numeric_operands(operator, left, right, span)?;
            Ok(Value::Number(a - b))
        }
        BinaryOperator::Multiply => {
            let (a, b) = numeric_operands(operator, left, right, span)?;
            Ok(Value::Number(a * b))
        }
        BinaryOperator::Divide => {
            let (a, b) = numeric_operands(operator, left, right, span)?;
            if b == 0.0 {
                return Err(RuntimeError::with_span(
                    RuntimeErrorKind::DivisionByZero,
                    span,
                ));
            }
            Ok(Value::Number(a / b))
        }
        BinaryOperator::Equal => Ok(Value::Boolean(left.equals(right))),
        BinaryOperator::NotEqual => Ok(Value::Boolean(!left.equals(right))),
        BinaryOperator::Greater => compare(operator, left, right, span, Ordering::is_gt),
        BinaryOperator::Less => compare(operator, left, right, span, Ordering::is_lt),
        BinaryOperator::GreaterEqual => compare(operator, left, right, span, Ordering::is_ge),
        BinaryOperator::LessEqual => compare(operator, left, right, span, Ordering::is_le),
        BinaryOperator::LogicalAnd => Ok(if left.is_truthy() {
            right.clone()
        } else {
            left.clone()
        }),
        BinaryOperator::LogicalOr => Ok(if left.is_truthy() {
            left.clone()
        } else {
            right.clone()
        }),
    }
}

fn numeric_operands(
    operator: BinaryOperator,
    left: &Value,
    right: &Value,
    span: Span,
) -> Result<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::invalid_operands(
            operator.symbol(),
            left,
            right,
            span,
        )),
    }
}

/// Ordering comparisons need two numbers or two strings; NaN compares false
fn compare(
    operator: BinaryOperator,
    left: &Value,
    right: &Value,
    span: Span,
    accept: fn(Ordering) -> bool,
) -> Result<Value> {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => {
            return Err(RuntimeError::invalid_operands(
                operator.symbol(),
                left,
                right,
                span,
            ));
        }
    };
    Ok(Value::Boolean(ordering.is_some_and(accept)))
}
