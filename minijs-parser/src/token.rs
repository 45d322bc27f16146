// minijs Tokens
// Token kinds, literal payloads and the reserved-word table

use crate::ast::Span;
use std::fmt;

/// Every kind of token the lexer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals and names
    Number,
    String,
    Identifier,
    Comment,

    // Operators
    Plus,
    Minus,
    Times,
    Divide,
    Assign,
    Equals,
    NotEquals,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    And,
    Or,
    Not,
    Arrow,
    Question,
    Colon,
    Dot,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,

    // Reserved words
    If,
    Else,
    While,
    Function,
    Return,
    Var,
    Let,
    Const,
    Console,
    Log,
    Break,
    For,
    Switch,
    Case,
    Default,
    Try,
    Catch,
    Throw,
    True,
    False,

    Eof,
}

impl TokenKind {
    /// Look up a word in the reserved-word table
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "function" => TokenKind::Function,
            "return" => TokenKind::Return,
            "var" => TokenKind::Var,
            "let" => TokenKind::Let,
            "const" => TokenKind::Const,
            "console" => TokenKind::Console,
            "log" => TokenKind::Log,
            "break" => TokenKind::Break,
            "for" => TokenKind::For,
            "switch" => TokenKind::Switch,
            "case" => TokenKind::Case,
            "default" => TokenKind::Default,
            "try" => TokenKind::Try,
            "catch" => TokenKind::Catch,
            "throw" => TokenKind::Throw,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => return None,
        };
        Some(kind)
    }

    /// Map operator or punctuation text to its kind
    pub fn punctuation(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "==" => TokenKind::Equals,
            "!=" => TokenKind::NotEquals,
            ">=" => TokenKind::GreaterEqual,
            "<=" => TokenKind::LessEqual,
            "&&" => TokenKind::And,
            "||" => TokenKind::Or,
            "=>" => TokenKind::Arrow,
            "+" => TokenKind::Plus,
            "-" => TokenKind::Minus,
            "*" => TokenKind::Times,
            "/" => TokenKind::Divide,
            "=" => TokenKind::Assign,
            ">" => TokenKind::Greater,
            "<" => TokenKind::Less,
            "!" => TokenKind::Not,
            "(" => TokenKind::LParen,
            ")" => TokenKind::RParen,
            "{" => TokenKind::LBrace,
            "}" => TokenKind::RBrace,
            "[" => TokenKind::LBracket,
            "]" => TokenKind::RBracket,
            ";" => TokenKind::Semicolon,
            "," => TokenKind::Comma,
            "." => TokenKind::Dot,
            "?" => TokenKind::Question,
            ":" => TokenKind::Colon,
            _ => return None,
        };
        Some(kind)
    }

    /// Upper-case name used in token listings (`LET`, `ID`, `NUMBER`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Identifier => "ID",
            TokenKind::Comment => "COMMENT",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Times => "TIMES",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Equals => "EQUALS",
            TokenKind::NotEquals => "NOTEQUALS",
            TokenKind::Greater => "GT",
            TokenKind::Less => "LT",
            TokenKind::GreaterEqual => "GE",
            TokenKind::LessEqual => "LE",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Arrow => "ARROW",
            TokenKind::Question => "QUESTION",
            TokenKind::Colon => "COLON",
            TokenKind::Dot => "DOT",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::Function => "FUNCTION",
            TokenKind::Return => "RETURN",
            TokenKind::Var => "VAR",
            TokenKind::Let => "LET",
            TokenKind::Const => "CONST",
            TokenKind::Console => "CONSOLE",
            TokenKind::Log => "LOG",
            TokenKind::Break => "BREAK",
            TokenKind::For => "FOR",
            TokenKind::Switch => "SWITCH",
            TokenKind::Case => "CASE",
            TokenKind::Default => "DEFAULT",
            TokenKind::Try => "TRY",
            TokenKind::Catch => "CATCH",
            TokenKind::Throw => "THROW",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Eof => "EOF",
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::Function
                | TokenKind::Return
                | TokenKind::Var
                | TokenKind::Let
                | TokenKind::Const
                | TokenKind::Console
                | TokenKind::Log
                | TokenKind::Break
                | TokenKind::For
                | TokenKind::Switch
                | TokenKind::Case
                | TokenKind::Default
                | TokenKind::Try
                | TokenKind::Catch
                | TokenKind::Throw
                | TokenKind::True
                | TokenKind::False
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Literal payload carried by a token
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Number(f64),
    /// String contents (quotes stripped), identifier text or comment text
    Text(String),
}

/// A single lexical unit with its source position
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: Literal,
    /// Exact source text of the token (empty for end of input)
    pub lexeme: String,
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in characters from the start of the line
    pub column: usize,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: Literal, lexeme: &str, span: Span) -> Self {
        Self {
            kind,
            literal,
            lexeme: lexeme.to_string(),
            line: span.line,
            column: span.column,
            span,
        }
    }

    /// End-of-input marker positioned at `span`
    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, Literal::None, "", span)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Identifier, string or comment text
    pub fn text(&self) -> Option<&str> {
        match &self.literal {
            Literal::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn number(&self) -> Option<f64> {
        match self.literal {
            Literal::Number(value) => Some(value),
            _ => None,
        }
    }

    /// How the token is shown in diagnostics
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.lexeme),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Literal::Number(value) => write!(f, "{}({})", self.kind, value),
            Literal::Text(text) if self.kind == TokenKind::String => {
                write!(f, "{}({:?})", self.kind, text)
            }
            Literal::Text(text) if !self.kind.is_keyword() => write!(f, "{}({})", self.kind, text),
            _ => write!(f, "{}", self.kind),
        }
    }
}
