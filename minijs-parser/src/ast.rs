// minijs AST Definitions
// Abstract Syntax Tree nodes with source positions

use std::fmt;

/// Source position information for tokens and AST nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// 1-based line of `start`
    pub line: usize,
    /// 1-based column of `start`
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Span covering `self` through the end of `other`
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start,
            end: other.end.max(self.end),
            line: self.line,
            column: self.column,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.start.into(), span.len())
    }
}

/// A line comment kept alongside the program
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text: String,
    pub span: Span,
}

/// Top-level program
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub comments: Vec<Comment>,
    pub span: Span,
}

/// A `{ ... }` statement list
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    Expression(Expression),
    Declaration(Declaration),
    Assignment(Assignment),
    FunctionDeclaration(FunctionDeclaration),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    Switch(SwitchStatement),
    Break,
    TryCatch(TryCatch),
    Throw(Expression),
    Return(Option<Expression>),
}

/// Declaration keyword used by a `var`/`let`/`const` statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::Var => write!(f, "var"),
            DeclarationKind::Let => write!(f, "let"),
            DeclarationKind::Const => write!(f, "const"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: Identifier,
    pub initializer: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Identifier,
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_block: Block,
    /// `else { ... }`; an `else if` is stored as a block holding one `if`
    pub else_block: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    /// A declaration or assignment
    pub init: Option<Box<Statement>>,
    pub condition: Option<Expression>,
    /// An assignment or expression statement
    pub update: Option<Box<Statement>>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    pub discriminant: Expression,
    pub cases: Vec<SwitchCase>,
    pub default: Option<Vec<Statement>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub test: Expression,
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryCatch {
    pub try_block: Block,
    pub parameter: Identifier,
    pub catch_block: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Number(f64),
    String(String),
    Boolean(bool),
    Identifier(Identifier),
    BinaryOp(BinaryOperation),
    UnaryOp(UnaryOperation),
    TernaryOp(TernaryOperation),
    FunctionCall(FunctionCall),
    AnonymousFunction(AnonymousFunction),
    ArrowFunction(ArrowFunction),
    ArrayLiteral(Vec<Expression>),
    ArrayAccess(ArrayAccess),
    ObjectLiteral(Vec<ObjectProperty>),
    PropertyAccess(PropertyAccess),
    MethodCall(MethodCall),
    ConsoleLog(Vec<Expression>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    LogicalAnd,
    LogicalOr,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Greater => ">",
            BinaryOperator::Less => "<",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::LogicalAnd => "&&",
            BinaryOperator::LogicalOr => "||",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `!`
    Not,
    /// `-`
    Negate,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperator::Not => write!(f, "!"),
            UnaryOperator::Negate => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperation {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperation {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TernaryOperation {
    pub condition: Box<Expression>,
    pub then_expr: Box<Expression>,
    pub else_expr: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub callee: Identifier,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnonymousFunction {
    pub parameters: Vec<Identifier>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunction {
    pub parameters: Vec<Identifier>,
    pub body: ArrowBody,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Expression(Box<Expression>),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAccess {
    pub array: Identifier,
    pub index: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    pub key: String,
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAccess {
    pub object: Identifier,
    pub property: Identifier,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub object: Identifier,
    pub method: Identifier,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

impl StatementKind {
    /// Node-kind name as used in tree listings
    pub fn name(&self) -> &'static str {
        match self {
            StatementKind::Expression(expr) => expr.kind.name(),
            StatementKind::Declaration(_) => "Declaration",
            StatementKind::Assignment(_) => "Assignment",
            StatementKind::FunctionDeclaration(_) => "FunctionDeclaration",
            StatementKind::If(_) => "IfStatement",
            StatementKind::While(_) => "WhileStatement",
            StatementKind::For(_) => "ForStatement",
            StatementKind::Switch(_) => "SwitchStatement",
            StatementKind::Break => "Break",
            StatementKind::TryCatch(_) => "TryCatch",
            StatementKind::Throw(_) => "Throw",
            StatementKind::Return(_) => "Return",
        }
    }
}

impl ExpressionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ExpressionKind::Number(_) => "Number",
            ExpressionKind::String(_) => "String",
            ExpressionKind::Boolean(_) => "Boolean",
            ExpressionKind::Identifier(_) => "Identifier",
            ExpressionKind::BinaryOp(_) => "BinaryOp",
            ExpressionKind::UnaryOp(_) => "UnaryOp",
            ExpressionKind::TernaryOp(_) => "TernaryOp",
            ExpressionKind::FunctionCall(_) => "FunctionCall",
            ExpressionKind::AnonymousFunction(_) => "AnonymousFunction",
            ExpressionKind::ArrowFunction(_) => "ArrowFunction",
            ExpressionKind::ArrayLiteral(_) => "ArrayLiteral",
            ExpressionKind::ArrayAccess(_) => "ArrayAccess",
            ExpressionKind::ObjectLiteral(_) => "ObjectLiteral",
            ExpressionKind::PropertyAccess(_) => "PropertyAccess",
            ExpressionKind::MethodCall(_) => "MethodCall",
            ExpressionKind::ConsoleLog(_) => "ConsoleLog",
        }
    }
}

impl Program {
    /// Node kinds in pre-order, starting with `Program`.
    ///
    /// Blocks contribute a `Statements` entry before their contents.
    pub fn node_kinds(&self) -> Vec<&'static str> {
        let mut kinds = vec!["Program"];
        for statement in &self.statements {
            collect_statement(statement, &mut kinds);
        }
        kinds
    }
}

fn collect_block(block: &Block, kinds: &mut Vec<&'static str>) {
    collect_statements(&block.statements, kinds);
}

fn collect_statements(statements: &[Statement], kinds: &mut Vec<&'static str>) {
    kinds.push("Statements");
    for statement in statements {
        collect_statement(statement, kinds);
    }
}

fn collect_statement(statement: &Statement, kinds: &mut Vec<&'static str>) {
    match &statement.kind {
        StatementKind::Expression(expr) => collect_expression(expr, kinds),
        StatementKind::Declaration(decl) => {
            kinds.push("Declaration");
            kinds.push("Identifier");
            if let Some(init) = &decl.initializer {
                collect_expression(init, kinds);
            }
        }
        StatementKind::Assignment(assign) => {
            kinds.push("Assignment");
            kinds.push("Identifier");
            collect_expression(&assign.value, kinds);
        }
        StatementKind::FunctionDeclaration(func) => {
            kinds.push("FunctionDeclaration");
            kinds.push("Identifier");
            collect_parameters(&func.parameters, kinds);
            collect_block(&func.body, kinds);
        }
        StatementKind::If(if_stmt) => {
            kinds.push("IfStatement");
            collect_expression(&if_stmt.condition, kinds);
            collect_block(&if_stmt.then_block, kinds);
            if let Some(else_block) = &if_stmt.else_block {
                collect_block(else_block, kinds);
            }
        }
        StatementKind::While(while_stmt) => {
            kinds.push("WhileStatement");
            collect_expression(&while_stmt.condition, kinds);
            collect_block(&while_stmt.body, kinds);
        }
        StatementKind::For(for_stmt) => {
            kinds.push("ForStatement");
            if let Some(init) = &for_stmt.init {
                collect_statement(init, kinds);
            }
            if let Some(condition) = &for_stmt.condition {
                collect_expression(condition, kinds);
            }
            if let Some(update) = &for_stmt.update {
                collect_statement(update, kinds);
            }
            collect_block(&for_stmt.body, kinds);
        }
        StatementKind::Switch(switch) => {
            kinds.push("SwitchStatement");
            collect_expression(&switch.discriminant, kinds);
            for case in &switch.cases {
                kinds.push("Case");
                collect_expression(&case.test, kinds);
                collect_statements(&case.body, kinds);
            }
            if let Some(default) = &switch.default {
                kinds.push("Default");
                collect_statements(default, kinds);
            }
        }
        StatementKind::Break => kinds.push("Break"),
        StatementKind::TryCatch(try_catch) => {
            kinds.push("TryCatch");
            collect_block(&try_catch.try_block, kinds);
            kinds.push("Identifier");
            collect_block(&try_catch.catch_block, kinds);
        }
        StatementKind::Throw(expr) => {
            kinds.push("Throw");
            collect_expression(expr, kinds);
        }
        StatementKind::Return(expr) => {
            kinds.push("Return");
            if let Some(expr) = expr {
                collect_expression(expr, kinds);
            }
        }
    }
}

fn collect_parameters(parameters: &[Identifier], kinds: &mut Vec<&'static str>) {
    kinds.push("Parameters");
    kinds.extend(parameters.iter().map(|_| "Parameter"));
}

fn collect_arguments(arguments: &[Expression], kinds: &mut Vec<&'static str>) {
    kinds.push("Arguments");
    for argument in arguments {
        collect_expression(argument, kinds);
    }
}

fn collect_expression(expr: &Expression, kinds: &mut Vec<&'static str>) {
    kinds.push(expr.kind.name());
    match &expr.kind {
        ExpressionKind::Number(_)
        | ExpressionKind::String(_)
        | ExpressionKind::Boolean(_)
        | ExpressionKind::Identifier(_) => {}
        ExpressionKind::BinaryOp(op) => {
            collect_expression(&op.left, kinds);
            collect_expression(&op.right, kinds);
        }
        ExpressionKind::UnaryOp(op) => collect_expression(&op.operand, kinds),
        ExpressionKind::TernaryOp(op) => {
            collect_expression(&op.condition, kinds);
            collect_expression(&op.then_expr, kinds);
            collect_expression(&op.else_expr, kinds);
        }
        ExpressionKind::FunctionCall(call) => {
            kinds.push("Identifier");
            collect_arguments(&call.arguments, kinds);
        }
        ExpressionKind::AnonymousFunction(func) => {
            collect_parameters(&func.parameters, kinds);
            collect_block(&func.body, kinds);
        }
        ExpressionKind::ArrowFunction(func) => {
            collect_parameters(&func.parameters, kinds);
            match &func.body {
                ArrowBody::Expression(body) => collect_expression(body, kinds),
                ArrowBody::Block(block) => collect_block(block, kinds),
            }
        }
        ExpressionKind::ArrayLiteral(elements) => {
            for element in elements {
                collect_expression(element, kinds);
            }
        }
        ExpressionKind::ArrayAccess(access) => {
            kinds.push("Identifier");
            collect_expression(&access.index, kinds);
        }
        ExpressionKind::ObjectLiteral(properties) => {
            for property in properties {
                collect_expression(&property.value, kinds);
            }
        }
        ExpressionKind::PropertyAccess(_) => {
            kinds.push("Identifier");
            kinds.push("Identifier");
        }
        ExpressionKind::MethodCall(call) => {
            kinds.push("Identifier");
            kinds.push("Identifier");
            collect_arguments(&call.arguments, kinds);
        }
        ExpressionKind::ConsoleLog(arguments) => collect_arguments(arguments, kinds),
    }
}
