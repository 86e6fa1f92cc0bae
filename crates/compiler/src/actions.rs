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

//! The semantic actions: one constructor per grammar production, called bottom-up by the tree
//! transformer. Every action takes the fragments its children produced and returns either a
//! validated node or `None`. A `None` child means a failure was already recorded below; a
//! rule violated here is recorded, logged and flips the success flag. Fragments a failing
//! action was handed are torn down on the spot so the census stays balanced.

use std::collections::HashSet;
use std::str::FromStr;

use tracing::{debug, error, warn};

use crate::ast::{
    Array, BinaryOp, CONTENT_KEY, Conditional, Expr, Loop, Object, Pair, Program, TYPE_KEY,
    UnaryOp, Value, VarRef,
};
use crate::errors::{CompileContext, CompileError};
use crate::teardown::{NodeKind, NodeTally, Release};
use crate::var_scope::{DeclType, Lookup, VarScope};
use crate::vocabulary::{Attribute, Tag, TagKind};

/// The header of a counter loop, `for (counter = initialization; condition; incremented =
/// increment)`, as handed over by the transformer.
#[derive(Debug)]
pub struct CounterHeader {
    pub counter: String,
    /// Whether `declare_counter` accepted the name.
    pub declared: bool,
    pub initialization: Option<Expr>,
    pub condition: Option<Expr>,
    pub incremented: String,
    pub increment: Option<Expr>,
}

/// Shared state of one compilation.
#[derive(Debug)]
pub struct SemanticActions {
    succeed: bool,
    diagnostics: Vec<CompileError>,
    warnings: Vec<CompileError>,
    scope: VarScope,
    census: NodeTally,
    released: NodeTally,
}

impl Default for SemanticActions {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a compilation leaves behind: the accepted tree (if any), what was reported along
/// the way, and the construction/release tallies.
#[derive(Debug)]
pub struct Compilation {
    pub program: Option<Program>,
    pub diagnostics: Vec<CompileError>,
    pub warnings: Vec<CompileError>,
    pub census: NodeTally,
    /// Nodes already released because they were orphaned by a failing action.
    pub released: NodeTally,
}

impl Compilation {
    pub fn succeeded(&self) -> bool {
        self.program.is_some() && self.diagnostics.is_empty()
    }

    pub fn first_error(&self) -> Option<&CompileError> {
        self.diagnostics.first()
    }

    /// Release whatever tree is left and return `(census, released)`. The two are equal for
    /// every compilation, accepted or not.
    pub fn teardown(self) -> (NodeTally, NodeTally) {
        let mut released = self.released;
        self.program.release(&mut released);
        debug!("Teardown complete: {released}");
        (self.census, released)
    }
}

impl SemanticActions {
    pub fn new() -> Self {
        Self {
            succeed: true,
            diagnostics: vec![],
            warnings: vec![],
            scope: VarScope::new(),
            census: NodeTally::new(),
            released: NodeTally::new(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.succeed
    }

    pub fn diagnostics(&self) -> &[CompileError] {
        &self.diagnostics
    }

    pub fn warnings(&self) -> &[CompileError] {
        &self.warnings
    }

    pub fn census(&self) -> &NodeTally {
        &self.census
    }

    pub fn scope(&self) -> &VarScope {
        &self.scope
    }

    pub fn into_compilation(self, program: Option<Program>) -> Compilation {
        Compilation {
            program,
            diagnostics: self.diagnostics,
            warnings: self.warnings,
            census: self.census,
            released: self.released,
        }
    }

    /// Record a rejection.
    pub fn fail(&mut self, error: CompileError) {
        error!("{error}");
        self.diagnostics.push(error);
        self.succeed = false;
    }

    /// Record a lexical problem that does not stop compilation.
    pub fn warn(&mut self, error: CompileError) {
        warn!("{error}");
        self.warnings.push(error);
    }

    fn discard(&mut self, fragment: impl Release) {
        fragment.release(&mut self.released);
    }

    fn built<T>(&mut self, kind: NodeKind, node: T) -> Option<T> {
        self.census.record(kind);
        Some(node)
    }

    fn resolve(&mut self, name: &str, context: CompileContext) -> bool {
        match self.scope.lookup(name) {
            Lookup::Resolved(_) => true,
            Lookup::Undefined => {
                self.fail(CompileError::UndefinedVariable(context, name.to_string()));
                false
            }
            Lookup::Circular => {
                self.fail(CompileError::CircularReference(context, name.to_string()));
                false
            }
        }
    }

    /// Tag vocabulary, attribute keys and content compatibility of an object whose head is
    /// already known to be `type`.
    fn validate_element(&mut self, object: &Object, context: CompileContext) -> bool {
        let type_context = object.pairs.first().map_or(context, |p| p.context);
        let Some(tag_name) = object.tag() else {
            self.fail(CompileError::NonStringType(type_context));
            return false;
        };
        let Ok(tag) = Tag::from_str(tag_name) else {
            self.fail(CompileError::UnknownTag(type_context, tag_name.to_string()));
            return false;
        };
        let violation = object.pairs.iter().skip(1).find_map(|pair| {
            if pair.key == CONTENT_KEY {
                return content_mismatch(tag.kind(), &pair.value).map(|reason| {
                    CompileError::ContentMismatch {
                        context: pair.context,
                        tag: tag.to_string(),
                        reason,
                    }
                });
            }
            let Ok(attribute) = Attribute::from_str(&pair.key) else {
                return Some(CompileError::UnknownAttribute {
                    context: pair.context,
                    tag: tag.to_string(),
                    key: pair.key.clone(),
                });
            };
            let accepted = match attribute {
                Attribute::Style => is_style_value(&pair.value),
                _ => is_attribute_value(&pair.value),
            };
            (!accepted).then(|| CompileError::InvalidAttributeValue {
                context: pair.context,
                key: pair.key.clone(),
                kind: pair.value.kind(),
            })
        });
        match violation {
            Some(error) => {
                self.fail(error);
                false
            }
            None => true,
        }
    }

    /// Program roots, conditional branches and loop bodies must be elements.
    fn require_element(&mut self, object: &Object, context: CompileContext) -> bool {
        if !object.is_element() {
            self.fail(CompileError::MissingType(context));
            return false;
        }
        self.validate_element(object, context)
    }

    pub fn string_value(&mut self, value: String) -> Option<Value> {
        debug!("string_value");
        self.built(NodeKind::Value, Value::String(value))
    }

    pub fn integer_value(&mut self, lexeme: &str, context: CompileContext) -> Option<Value> {
        debug!("integer_value {lexeme}");
        let i = self.parse_integer(lexeme, context)?;
        self.built(NodeKind::Value, Value::Integer(i))
    }

    pub fn float_value(&mut self, lexeme: &str, context: CompileContext) -> Option<Value> {
        debug!("float_value {lexeme}");
        let f = self.parse_float(lexeme, context)?;
        self.built(NodeKind::Value, Value::Float(f))
    }

    pub fn boolean_value(&mut self, value: bool) -> Option<Value> {
        debug!("boolean_value {value}");
        self.built(NodeKind::Value, Value::Boolean(value))
    }

    pub fn null_value(&mut self) -> Option<Value> {
        debug!("null_value");
        self.built(NodeKind::Value, Value::Null)
    }

    fn parse_integer(&mut self, lexeme: &str, context: CompileContext) -> Option<i64> {
        match lexeme.parse::<i64>() {
            Ok(i) => Some(i),
            Err(_) => {
                self.fail(CompileError::InvalidLiteral {
                    context,
                    kind: "integer",
                    literal: lexeme.to_string(),
                });
                None
            }
        }
    }

    fn parse_float(&mut self, lexeme: &str, context: CompileContext) -> Option<f64> {
        match lexeme.parse::<f64>() {
            Ok(f) if f.is_finite() => Some(f),
            _ => {
                self.fail(CompileError::InvalidLiteral {
                    context,
                    kind: "float",
                    literal: lexeme.to_string(),
                });
                None
            }
        }
    }

    pub fn pair(
        &mut self,
        key: String,
        value: Option<Value>,
        context: CompileContext,
    ) -> Option<Pair> {
        debug!("pair {key}");
        let value = value?;
        self.built(
            NodeKind::Pair,
            Pair {
                key,
                value,
                context,
            },
        )
    }

    /// Duplicate keys and a `type` anywhere but the head are rejected for every object.
    pub fn object(&mut self, pairs: Vec<Option<Pair>>, context: CompileContext) -> Option<Object> {
        debug!("object @ {context} ({} pairs)", pairs.len());
        if pairs.iter().any(Option::is_none) {
            self.discard(pairs);
            return None;
        }
        let pairs: Vec<Pair> = pairs.into_iter().flatten().collect();
        let violation = {
            let mut seen = HashSet::new();
            let duplicate = pairs
                .iter()
                .find(|p| !seen.insert(p.key.as_str()))
                .map(|p| CompileError::DuplicateKey(p.context, p.key.clone()));
            duplicate.or_else(|| {
                pairs
                    .iter()
                    .skip(1)
                    .find(|p| p.key == TYPE_KEY)
                    .map(|p| CompileError::MisplacedType(p.context))
            })
        };
        if let Some(error) = violation {
            self.fail(error);
            self.discard(pairs);
            return None;
        }
        self.built(NodeKind::Object, Object { pairs })
    }

    /// An object in value position. Objects headed by `type` become elements; anything else is
    /// plain data, where a `{var: "name"}` object must name a variable in scope.
    pub fn object_value(
        &mut self,
        object: Option<Object>,
        context: CompileContext,
    ) -> Option<Value> {
        let object = object?;
        if object.is_element() {
            return self.element(object, context);
        }
        debug!("object_value @ {context}: data");
        if let Some(name) = object.as_var_ref() {
            let name = name.to_string();
            if !self.resolve(&name, context) {
                self.discard(object);
                return None;
            }
        }
        self.built(NodeKind::Value, Value::Object(object))
    }

    pub fn array(&mut self, values: Vec<Option<Value>>) -> Option<Array> {
        debug!("array ({} values)", values.len());
        if values.iter().any(Option::is_none) {
            self.discard(values);
            return None;
        }
        let values = values.into_iter().flatten().collect();
        self.built(NodeKind::Array, Array { values })
    }

    pub fn array_value(&mut self, array: Option<Array>) -> Option<Value> {
        let array = array?;
        self.built(NodeKind::Value, Value::Array(array))
    }

    /// `else_branch` is None when the conditional has no `else`, and `Some(None)` when it has
    /// one that failed.
    pub fn conditional(
        &mut self,
        condition: Option<Expr>,
        then_branch: Option<Object>,
        else_branch: Option<Option<Object>>,
        context: CompileContext,
    ) -> Option<Conditional> {
        debug!("conditional @ {context}");
        let (condition, then_branch, else_branch) = match (condition, then_branch, else_branch) {
            (Some(c), Some(t), None) => (c, t, None),
            (Some(c), Some(t), Some(Some(e))) => (c, t, Some(e)),
            (condition, then_branch, else_branch) => {
                self.discard(condition);
                self.discard(then_branch);
                self.discard(else_branch.flatten());
                return None;
            }
        };
        let valid = if condition.is_boolean_capable() {
            self.require_element(&then_branch, context)
                && else_branch
                    .as_ref()
                    .is_none_or(|e| self.require_element(e, context))
        } else {
            self.fail(CompileError::NonBooleanCondition(context));
            false
        };
        if !valid {
            self.discard(condition);
            self.discard(then_branch);
            self.discard(else_branch);
            return None;
        }
        self.built(
            NodeKind::Conditional,
            Conditional {
                condition,
                then_branch,
                else_branch,
            },
        )
    }

    pub fn conditional_value(&mut self, conditional: Option<Conditional>) -> Option<Value> {
        let conditional = conditional?;
        self.built(NodeKind::Value, Value::Conditional(conditional))
    }

    /// Fires before the iterable is reduced; the name is in the resolving state until
    /// `complete_declaration`.
    pub fn declare_iterator(&mut self, name: &str, context: CompileContext) -> bool {
        self.declare(name, DeclType::Iterator, context)
    }

    /// Fires before the initializer is reduced.
    pub fn declare_counter(&mut self, name: &str, context: CompileContext) -> bool {
        self.declare(name, DeclType::Counter, context)
    }

    fn declare(&mut self, name: &str, decl_type: DeclType, context: CompileContext) -> bool {
        debug!("declare {decl_type:?} {name} @ {context}");
        if self.scope.declare(name, decl_type).is_none() {
            self.fail(CompileError::DuplicateVariable(context, name.to_string()));
            return false;
        }
        true
    }

    pub fn complete_declaration(&mut self, name: &str) {
        debug!("complete_declaration {name}");
        self.scope.complete(name);
    }

    pub fn iterator_loop(
        &mut self,
        iterator: String,
        declared: bool,
        iterable: Option<Object>,
        body: Option<Object>,
        context: CompileContext,
    ) -> Option<Loop> {
        debug!("iterator_loop {iterator} @ {context}");
        if declared {
            self.scope.release(&iterator);
        }
        let (iterable, body) = match (iterable, body) {
            (Some(iterable), Some(body)) if declared => (iterable, body),
            (iterable, body) => {
                self.discard(iterable);
                self.discard(body);
                return None;
            }
        };
        if !self.require_element(&body, context) {
            self.discard(iterable);
            self.discard(body);
            return None;
        }
        self.built(
            NodeKind::Loop,
            Loop::Iterator {
                iterator,
                iterable,
                body,
            },
        )
    }

    pub fn counter_loop(
        &mut self,
        header: CounterHeader,
        body: Option<Object>,
        context: CompileContext,
    ) -> Option<Loop> {
        let CounterHeader {
            counter,
            declared,
            initialization,
            condition,
            incremented,
            increment,
        } = header;
        debug!("counter_loop {counter} @ {context}");
        if declared {
            self.scope.release(&counter);
        }
        let (initialization, condition, increment, body) =
            match (initialization, condition, increment, body) {
                (Some(i), Some(c), Some(n), Some(b)) if declared => (i, c, n, b),
                (initialization, condition, increment, body) => {
                    self.discard(initialization);
                    self.discard(condition);
                    self.discard(increment);
                    self.discard(body);
                    return None;
                }
            };
        let valid = if incremented != counter {
            self.fail(CompileError::CounterMismatch {
                context,
                declared: counter.clone(),
                incremented,
            });
            false
        } else if !condition.is_boolean_capable() {
            self.fail(CompileError::NonBooleanCondition(context));
            false
        } else {
            self.require_element(&body, context)
        };
        if !valid {
            self.discard(initialization);
            self.discard(condition);
            self.discard(increment);
            self.discard(body);
            return None;
        }
        self.built(
            NodeKind::Loop,
            Loop::Counter {
                counter,
                initialization,
                condition,
                increment,
                body,
            },
        )
    }

    pub fn loop_value(&mut self, l: Option<Loop>) -> Option<Value> {
        let l = l?;
        self.built(NodeKind::Value, Value::Loop(l))
    }

    pub fn integer_expression(&mut self, lexeme: &str, context: CompileContext) -> Option<Expr> {
        let i = self.parse_integer(lexeme, context)?;
        self.built(NodeKind::Expr, Expr::Integer(i))
    }

    pub fn float_expression(&mut self, lexeme: &str, context: CompileContext) -> Option<Expr> {
        let f = self.parse_float(lexeme, context)?;
        self.built(NodeKind::Expr, Expr::Float(f))
    }

    pub fn string_expression(&mut self, value: String) -> Option<Expr> {
        self.built(NodeKind::Expr, Expr::String(value))
    }

    pub fn boolean_expression(&mut self, value: bool) -> Option<Expr> {
        self.built(NodeKind::Expr, Expr::Boolean(value))
    }

    pub fn var_ref_expression(&mut self, var: Option<VarRef>) -> Option<Expr> {
        let var = var?;
        self.built(NodeKind::Expr, Expr::VarRef(var))
    }

    pub fn binary_expression(
        &mut self,
        op: BinaryOp,
        left: Option<Expr>,
        right: Option<Expr>,
    ) -> Option<Expr> {
        debug!("binary_expression {op}");
        match (left, right) {
            (Some(left), Some(right)) => self.built(
                NodeKind::Expr,
                Expr::Binary(op, Box::new(left), Box::new(right)),
            ),
            (left, right) => {
                self.discard(left);
                self.discard(right);
                None
            }
        }
    }

    pub fn unary_expression(&mut self, op: UnaryOp, operand: Option<Expr>) -> Option<Expr> {
        debug!("unary_expression {op}");
        let operand = operand?;
        self.built(NodeKind::Expr, Expr::Unary(op, Box::new(operand)))
    }

    pub fn var_ref(&mut self, name: &str, context: CompileContext) -> Option<VarRef> {
        debug!("var_ref {name} @ {context}");
        if !self.resolve(name, context) {
            return None;
        }
        self.built(
            NodeKind::VarRef,
            VarRef {
                name: name.to_string(),
            },
        )
    }

    pub fn var_ref_value(&mut self, var: Option<VarRef>) -> Option<Value> {
        let var = var?;
        self.built(NodeKind::Value, Value::VarRef(var))
    }

    /// An object headed by `type` in value position: tag, attributes and content are checked
    /// before it becomes an element.
    pub fn element(&mut self, object: Object, context: CompileContext) -> Option<Value> {
        debug!("element @ {context}");
        if !self.validate_element(&object, context) {
            self.discard(object);
            return None;
        }
        self.built(NodeKind::Value, Value::Element(object))
    }

    /// The single accept/reject decision.
    pub fn program(&mut self, object: Option<Object>, context: CompileContext) -> Option<Program> {
        let object = object?;
        if !self.require_element(&object, context) || !self.succeed {
            self.discard(object);
            return None;
        }
        debug!("program accepted");
        self.built(NodeKind::Program, Program { object })
    }
}

/// Why `value` cannot be the `content` of an element of the given kind, if it cannot.
fn content_mismatch(kind: TagKind, value: &Value) -> Option<String> {
    match (kind, value) {
        (TagKind::Void, _) => Some("void elements cannot hold content".to_string()),
        (TagKind::TextOnly, Value::String(_) | Value::VarRef(_)) => None,
        (TagKind::TextOnly, Value::Object(object)) if object.as_var_ref().is_some() => None,
        (TagKind::TextOnly, other) => Some(format!(
            "text-only elements cannot hold a {}",
            other.kind()
        )),
        (TagKind::Container, Value::String(_)) => {
            Some("container elements cannot hold a bare string".to_string())
        }
        // Text items of a content array render as text nodes between the child elements.
        (TagKind::Container, _) => None,
    }
}

fn is_attribute_value(value: &Value) -> bool {
    match value {
        Value::String(_)
        | Value::Integer(_)
        | Value::Float(_)
        | Value::Boolean(_)
        | Value::Null
        | Value::VarRef(_) => true,
        Value::Object(object) => object.as_var_ref().is_some(),
        _ => false,
    }
}

/// `style` also takes an object of CSS properties, `{color: "red", width: 10}`.
fn is_style_value(value: &Value) -> bool {
    match value {
        Value::Object(object) if object.as_var_ref().is_none() => {
            object.pairs.iter().all(|property| {
                matches!(
                    property.value,
                    Value::String(_) | Value::Integer(_) | Value::Float(_) | Value::VarRef(_)
                )
            })
        }
        other => is_attribute_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> CompileContext {
        CompileContext::default()
    }

    fn element_object(actions: &mut SemanticActions, tag: &str, content: Option<Value>) -> Object {
        let tag = actions_string(actions, tag);
        let mut pairs = vec![actions.pair(TYPE_KEY.into(), tag, ctx())];
        if let Some(content) = content {
            pairs.push(actions.pair(CONTENT_KEY.into(), Some(content), ctx()));
        }
        actions.object(pairs, ctx()).unwrap()
    }

    fn actions_string(actions: &mut SemanticActions, s: &str) -> Option<Value> {
        actions.string_value(s.to_string())
    }

    #[test]
    fn test_accepts_simple_program() {
        let mut actions = SemanticActions::new();
        let hello = actions_string(&mut actions, "Hello");
        let p = element_object(&mut actions, "p", hello);
        let program = actions.program(Some(p), ctx());
        assert!(program.is_some());
        assert!(actions.succeeded());
        let compilation = actions.into_compilation(program);
        let (census, released) = compilation.teardown();
        assert_eq!(census, released);
        assert_eq!(census.get(NodeKind::Pair), 2);
    }

    #[test]
    fn test_failure_releases_orphans() {
        let mut actions = SemanticActions::new();
        let text = actions_string(&mut actions, "hello");
        let div = element_object(&mut actions, "div", text);
        let value = actions.object_value(Some(div), ctx());
        assert!(value.is_none());
        assert!(!actions.succeeded());
        assert!(matches!(
            actions.diagnostics()[0],
            CompileError::ContentMismatch { .. }
        ));
        let program = actions.program(None, ctx());
        let (census, released) = actions.into_compilation(program).teardown();
        assert_eq!(census, released);
    }

    #[test]
    fn test_none_child_propagates_without_new_error() {
        let mut actions = SemanticActions::new();
        let pair = actions.pair("id".into(), None, ctx());
        assert!(pair.is_none());
        assert!(actions.object(vec![pair], ctx()).is_none());
        assert!(actions.succeeded());
        assert!(actions.diagnostics().is_empty());
    }

    #[test]
    fn test_declaration_lifecycle() {
        let mut actions = SemanticActions::new();
        assert!(actions.declare_iterator("item", ctx()));
        assert!(actions.var_ref("item", ctx()).is_none());
        assert!(matches!(
            actions.diagnostics()[0],
            CompileError::CircularReference(_, ref name) if name == "item"
        ));
        actions.complete_declaration("item");
        assert!(actions.var_ref("item", ctx()).is_some());
        assert!(!actions.declare_counter("item", ctx()));
        assert!(matches!(
            actions.diagnostics()[1],
            CompileError::DuplicateVariable(..)
        ));
    }

    #[test]
    fn test_counter_mismatch() {
        let mut actions = SemanticActions::new();
        assert!(actions.declare_counter("i", ctx()));
        let initialization = actions.integer_expression("0", ctx());
        actions.complete_declaration("i");
        let i = actions.var_ref("i", ctx());
        let i = actions.var_ref_expression(i);
        let three = actions.integer_expression("3", ctx());
        let condition = actions.binary_expression(BinaryOp::Lt, i, three);
        let increment = actions.integer_expression("1", ctx());
        let body = element_object(&mut actions, "div", None);
        let header = CounterHeader {
            counter: "i".into(),
            declared: true,
            initialization,
            condition,
            incremented: "j".into(),
            increment,
        };
        assert!(actions.counter_loop(header, Some(body), ctx()).is_none());
        assert!(matches!(
            actions.diagnostics()[0],
            CompileError::CounterMismatch { .. }
        ));
        assert!(actions.scope().is_empty());
    }

    #[test]
    fn test_content_rules() {
        assert!(content_mismatch(TagKind::TextOnly, &Value::String("x".into())).is_none());
        assert!(content_mismatch(TagKind::TextOnly, &Value::Integer(1)).is_some());
        assert!(content_mismatch(TagKind::Void, &Value::Null).is_some());
        let nested = Value::Array(Array {
            values: vec![
                Value::String("text".into()),
                Value::Array(Array {
                    values: vec![Value::String("deep".into())],
                }),
            ],
        });
        assert!(content_mismatch(TagKind::Container, &nested).is_none());
        assert!(content_mismatch(TagKind::Container, &Value::String("x".into())).is_some());
        assert!(content_mismatch(TagKind::Container, &Value::Integer(1)).is_none());
    }

    #[test]
    fn test_style_values() {
        let mut actions = SemanticActions::new();
        let red = actions_string(&mut actions, "red");
        let color = actions.pair("color".into(), red, ctx());
        let width = actions.integer_value("10", ctx());
        let width = actions.pair("width".into(), width, ctx());
        let properties = actions.object(vec![color, width], ctx()).unwrap();
        assert!(is_style_value(&Value::Object(properties.clone())));
        assert!(!is_attribute_value(&Value::Object(properties)));
        assert!(is_style_value(&Value::String("color: red".into())));

        let nested = Object {
            pairs: vec![Pair {
                key: "margin".into(),
                value: Value::Array(Array { values: vec![] }),
                context: ctx(),
            }],
        };
        assert!(!is_style_value(&Value::Object(nested)));
    }
}
