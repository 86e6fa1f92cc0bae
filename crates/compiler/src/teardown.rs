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

//! Whole-tree release. Nodes are consumed depth-first, children before their parent, and
//! every release is tallied so it can be checked against what the semantic actions built.

use std::fmt::{Display, Formatter};

use strum::{EnumCount, EnumIter, IntoEnumIterator};
use tracing::debug;

use crate::ast::{Array, Conditional, Expr, Loop, Object, Pair, Program, Value, VarRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum NodeKind {
    Program,
    Object,
    Pair,
    Value,
    Array,
    Conditional,
    Loop,
    Expr,
    VarRef,
}

/// Per-kind node counter, used both as the construction census and the release tally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTally {
    counts: [usize; NodeKind::COUNT],
}

impl NodeTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: NodeKind) {
        self.counts[kind as usize] += 1;
    }

    pub fn get(&self, kind: NodeKind) -> usize {
        self.counts[kind as usize]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl Display for NodeTally {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for kind in NodeKind::iter() {
            let count = self.get(kind);
            if count == 0 {
                continue;
            }
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{kind:?}={count}")?;
            first = false;
        }
        Ok(())
    }
}

/// A node that can be torn down into a tally.
pub trait Release {
    fn release(self, tally: &mut NodeTally);
}

impl<T: Release> Release for Option<T> {
    fn release(self, tally: &mut NodeTally) {
        if let Some(node) = self {
            node.release(tally);
        }
    }
}

impl<T: Release> Release for Box<T> {
    fn release(self, tally: &mut NodeTally) {
        (*self).release(tally);
    }
}

impl<T: Release> Release for Vec<T> {
    fn release(self, tally: &mut NodeTally) {
        for node in self {
            node.release(tally);
        }
    }
}

impl Release for Program {
    fn release(self, tally: &mut NodeTally) {
        self.object.release(tally);
        tally.record(NodeKind::Program);
    }
}

impl Release for Object {
    fn release(self, tally: &mut NodeTally) {
        self.pairs.release(tally);
        tally.record(NodeKind::Object);
    }
}

impl Release for Pair {
    fn release(self, tally: &mut NodeTally) {
        self.value.release(tally);
        tally.record(NodeKind::Pair);
    }
}

impl Release for Value {
    fn release(self, tally: &mut NodeTally) {
        match self {
            Value::String(_)
            | Value::Integer(_)
            | Value::Float(_)
            | Value::Boolean(_)
            | Value::Null => {}
            Value::Object(object) | Value::Element(object) => object.release(tally),
            Value::Array(array) => array.release(tally),
            Value::Conditional(conditional) => conditional.release(tally),
            Value::Loop(l) => l.release(tally),
            Value::VarRef(var) => var.release(tally),
        }
        tally.record(NodeKind::Value);
    }
}

impl Release for Array {
    fn release(self, tally: &mut NodeTally) {
        self.values.release(tally);
        tally.record(NodeKind::Array);
    }
}

impl Release for Conditional {
    fn release(self, tally: &mut NodeTally) {
        self.condition.release(tally);
        self.then_branch.release(tally);
        self.else_branch.release(tally);
        tally.record(NodeKind::Conditional);
    }
}

impl Release for Loop {
    fn release(self, tally: &mut NodeTally) {
        match self {
            Loop::Iterator { iterable, body, .. } => {
                iterable.release(tally);
                body.release(tally);
            }
            Loop::Counter {
                initialization,
                condition,
                increment,
                body,
                ..
            } => {
                initialization.release(tally);
                condition.release(tally);
                increment.release(tally);
                body.release(tally);
            }
        }
        tally.record(NodeKind::Loop);
    }
}

impl Release for Expr {
    fn release(self, tally: &mut NodeTally) {
        match self {
            Expr::Integer(_) | Expr::Float(_) | Expr::String(_) | Expr::Boolean(_) => {}
            Expr::VarRef(var) => var.release(tally),
            Expr::Binary(_, left, right) => {
                left.release(tally);
                right.release(tally);
            }
            Expr::Unary(_, operand) => operand.release(tally),
        }
        tally.record(NodeKind::Expr);
    }
}

impl Release for VarRef {
    fn release(self, tally: &mut NodeTally) {
        tally.record(NodeKind::VarRef);
    }
}

/// Tear down a whole program. Accepts the absent tree a rejected compilation leaves behind.
pub fn release_program(program: Option<Program>) -> NodeTally {
    let mut tally = NodeTally::new();
    program.release(&mut tally);
    debug!("Released AST: {tally}");
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Expr, Pair, Value};
    use crate::errors::CompileContext;

    fn pair(key: &str, value: Value) -> Pair {
        Pair {
            key: key.into(),
            value,
            context: CompileContext::default(),
        }
    }

    #[test]
    fn test_release_counts_each_node_once() {
        let program = Program {
            object: Object {
                pairs: vec![
                    pair("type", Value::String("div".into())),
                    pair(
                        "content",
                        Value::Conditional(Conditional {
                            condition: Expr::Binary(
                                BinaryOp::Eq,
                                Box::new(Expr::Integer(1)),
                                Box::new(Expr::VarRef(VarRef { name: "x".into() })),
                            ),
                            then_branch: Object {
                                pairs: vec![pair("type", Value::String("p".into()))],
                            },
                            else_branch: None,
                        }),
                    ),
                ],
            },
        };
        let tally = release_program(Some(program));
        assert_eq!(tally.get(NodeKind::Program), 1);
        assert_eq!(tally.get(NodeKind::Object), 2);
        assert_eq!(tally.get(NodeKind::Pair), 3);
        assert_eq!(tally.get(NodeKind::Value), 3);
        assert_eq!(tally.get(NodeKind::Conditional), 1);
        assert_eq!(tally.get(NodeKind::Expr), 3);
        assert_eq!(tally.get(NodeKind::VarRef), 1);
        assert_eq!(tally.total(), 14);
    }

    #[test]
    fn test_release_absent_tree() {
        assert_eq!(release_program(None), NodeTally::new());
    }

    #[test]
    fn test_tally_display_skips_zero() {
        let mut tally = NodeTally::new();
        tally.record(NodeKind::Pair);
        tally.record(NodeKind::Pair);
        tally.record(NodeKind::Object);
        assert_eq!(tally.to_string(), "Object=1, Pair=2");
    }
}
