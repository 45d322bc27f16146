//! Runtime value representation for the minijs interpreter.
//!
//! Arrays and objects are shared, mutable containers: copying a value copies
//! the handle, so `push`/`pop` through one alias are visible through every
//! other alias.

use indexmap::IndexMap;
use minijs_parser::{Block, Expression};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub type ArrayRef = Rc<RefCell<Vec<Value>>>;
pub type ObjectRef = Rc<RefCell<IndexMap<String, Value>>>;

/// Runtime values in the minijs interpreter
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    /// IEEE-754 double, as in JavaScript
    Number(f64),
    String(String),
    Boolean(bool),
    Array(ArrayRef),
    /// Keys keep insertion order
    Object(ObjectRef),
    Function(Rc<Callable>),
}

/// A function value: named declaration, anonymous function or arrow
#[derive(Debug, PartialEq)]
pub struct Callable {
    pub name: Option<String>,
    pub parameters: Vec<String>,
    pub body: CallableBody,
}

#[derive(Debug, PartialEq)]
pub enum CallableBody {
    Block(Block),
    /// Arrow function with an expression body
    Expression(Expression),
}

impl Callable {
    pub fn new(name: Option<String>, parameters: Vec<String>, body: CallableBody) -> Self {
        Self {
            name,
            parameters,
            body,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(anonymous)")
    }
}

impl Value {
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn object(properties: IndexMap<String, Value>) -> Self {
        Value::Object(Rc::new(RefCell::new(properties)))
    }

    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    /// Get the type name of this value, as `typeof` would report it
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    /// `false`, `0`, `NaN`, `""` and `undefined` are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Function(_) => true,
        }
    }

    /// Structural equality. Values of different types are never equal.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, value)| b.get(key).is_some_and(|other| value.equals(other)))
            }
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Format a number the way JavaScript prints it
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 {
        let formatted = format!("{n:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        }
    } else if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut seen = Vec::new();
        write_value(f, self, false, &mut seen)
    }
}

fn write_value(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    nested: bool,
    seen: &mut Vec<*const ()>,
) -> fmt::Result {
    match value {
        Value::Undefined => f.write_str("undefined"),
        Value::Number(n) => f.write_str(&format_number(*n)),
        Value::Boolean(b) => write!(f, "{b}"),
        Value::String(s) if nested => write!(f, "'{s}'"),
        Value::String(s) => f.write_str(s),
        Value::Function(callable) => match &callable.name {
            Some(name) => write!(f, "[Function: {name}]"),
            None => f.write_str("[Function (anonymous)]"),
        },
        Value::Array(items) => {
            let ptr = Rc::as_ptr(items) as *const ();
            if seen.contains(&ptr) {
                return f.write_str("[Circular]");
            }
            seen.push(ptr);
            f.write_str("[")?;
            for (i, item) in items.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item, true, seen)?;
            }
            seen.pop();
            f.write_str("]")
        }
        Value::Object(properties) => {
            let ptr = Rc::as_ptr(properties) as *const ();
            if seen.contains(&ptr) {
                return f.write_str("[Circular]");
            }
            let properties = properties.borrow();
            if properties.is_empty() {
                return f.write_str("{}");
            }
            seen.push(ptr);
            f.write_str("{")?;
            for (i, (key, item)) in properties.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key}: ")?;
                write_value(f, item, true, seen)?;
            }
            seen.pop();
            f.write_str("}")
        }
    }
}
