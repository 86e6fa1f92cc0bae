// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

/// The abstract syntax tree assembled by the semantic actions and walked by the generators.
use std::fmt::Display;

use crate::errors::CompileContext;

pub const TYPE_KEY: &str = "type";
pub const CONTENT_KEY: &str = "content";
pub const VAR_KEY: &str = "var";

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub object: Object,
}

/// An ordered list of pairs. Order is significant; it becomes attribute and child order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    pub pairs: Vec<Pair>,
}

impl Object {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.pairs.iter().find(|p| p.key == key).map(|p| &p.value)
    }

    pub fn first_key(&self) -> Option<&str> {
        self.pairs.first().map(|p| p.key.as_str())
    }

    /// True if the head pair is `type`, i.e. the object describes an element.
    pub fn is_element(&self) -> bool {
        self.first_key() == Some(TYPE_KEY)
    }

    /// The tag named by the `type` field, when it is a string.
    pub fn tag(&self) -> Option<&str> {
        match self.get(TYPE_KEY) {
            Some(Value::String(tag)) => Some(tag),
            _ => None,
        }
    }

    /// `{var: "name"}`: a single pair keyed `var` holding a string or a reference.
    pub fn as_var_ref(&self) -> Option<&str> {
        let [pair] = self.pairs.as_slice() else {
            return None;
        };
        if pair.key != VAR_KEY {
            return None;
        }
        match &pair.value {
            Value::String(name) => Some(name),
            Value::VarRef(var) => Some(&var.name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub key: String,
    pub value: Value,
    pub context: CompileContext,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
    /// A plain data object; it has no `type` field.
    Object(Object),
    Array(Array),
    Conditional(Conditional),
    Loop(Loop),
    VarRef(VarRef),
    /// An object validated as an element: `type` first, known tag, compatible content.
    Element(Object),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::Conditional(_) => "conditional",
            Value::Loop(_) => "loop",
            Value::VarRef(_) => "variable reference",
            Value::Element(_) => "element",
        }
    }

    /// The name held by a `{var: "name"}` data object.
    pub fn as_object_var_ref(&self) -> Option<&str> {
        match self {
            Value::Object(object) => object.as_var_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub condition: Expr,
    pub then_branch: Object,
    pub else_branch: Option<Object>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Loop {
    /// `for item in { ... } { body }`
    Iterator {
        iterator: String,
        iterable: Object,
        body: Object,
    },
    /// `for (i = init; condition; i = increment) { body }`
    Counter {
        counter: String,
        initialization: Expr,
        condition: Expr,
        increment: Expr,
        body: Object,
    },
}

impl Loop {
    pub fn body(&self) -> &Object {
        match self {
            Loop::Iterator { body, .. } | Loop::Counter { body, .. } => body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRef {
    pub name: String,
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NEq,
    Lt,
    LtE,
    Gt,
    GtE,
    And,
    Or,
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
            Self::Mod => write!(f, "%"),
            Self::Eq => write!(f, "=="),
            Self::NEq => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::LtE => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::GtE => write!(f, ">="),
            Self::And => write!(f, "&&"),
            Self::Or => write!(f, "||"),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Neg => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    VarRef(VarRef),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Unary(UnaryOp, Box<Expr>),
}

impl Expr {
    /// Boolean literals and operator applications may yield a truth value; bare operands may not.
    pub fn is_boolean_capable(&self) -> bool {
        matches!(self, Expr::Boolean(_) | Expr::Binary(..) | Expr::Unary(..))
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Integer(i) => write!(f, "{i}"),
            Expr::Float(x) => write!(f, "{x}"),
            Expr::String(s) => write!(f, "{s:?}"),
            Expr::Boolean(b) => write!(f, "{b}"),
            Expr::VarRef(var) => write!(f, "{}", var.name),
            Expr::Binary(op, l, r) => write!(f, "({l} {op} {r})"),
            Expr::Unary(op, e) => write!(f, "{op}{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: Value) -> Pair {
        Pair {
            key: key.to_string(),
            value,
            context: CompileContext::default(),
        }
    }

    #[test]
    fn test_var_ref_object() {
        let object = Object {
            pairs: vec![pair(VAR_KEY, Value::String("item".into()))],
        };
        assert_eq!(object.as_var_ref(), Some("item"));
        assert!(!object.is_element());

        let two = Object {
            pairs: vec![
                pair(VAR_KEY, Value::String("item".into())),
                pair("id", Value::Integer(1)),
            ],
        };
        assert_eq!(two.as_var_ref(), None);
    }

    #[test]
    fn test_element_head() {
        let object = Object {
            pairs: vec![
                pair(TYPE_KEY, Value::String("p".into())),
                pair(CONTENT_KEY, Value::String("hi".into())),
            ],
        };
        assert!(object.is_element());
        assert_eq!(object.tag(), Some("p"));
        assert_eq!(object.get(CONTENT_KEY), Some(&Value::String("hi".into())));
    }

    #[test]
    fn test_expr_display_and_kind() {
        let e = Expr::Binary(
            BinaryOp::Lt,
            Box::new(Expr::VarRef(VarRef { name: "i".into() })),
            Box::new(Expr::Integer(3)),
        );
        assert_eq!(e.to_string(), "(i < 3)");
        assert!(e.is_boolean_capable());
        assert!(!Expr::Integer(1).is_boolean_capable());
        assert!(!Expr::VarRef(VarRef { name: "x".into() }).is_boolean_capable());
    }
}
